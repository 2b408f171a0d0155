#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;
#[cfg(test)]
mod tests;

use clap::Parser;

use crate::args::{Cli, Commands};
use crate::client::build_ctx_from_cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), client::CliError> {
    let ctx = build_ctx_from_cli(&cli)?;
    match cli.command {
        Commands::Blogs(args) => handlers::blogs::handle(&ctx, args).await,
        Commands::Upload { file } => handlers::uploads::upload(&ctx, &file).await,
    }
}
