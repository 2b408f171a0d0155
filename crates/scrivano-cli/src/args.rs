//! Command-line surface for `scrivano-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "scrivano-cli", version, about = "Scrivano blog API CLI", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <http://localhost:3000>
    #[arg(long, env = "SCRIVANO_SITE_URL")]
    pub site: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Blog post management (list/save/delete)
    Blogs(BlogsArgs),
    /// Upload a file for hosting
    Upload {
        /// Path of the file to upload
        file: PathBuf,
    },
}

#[derive(Parser, Debug)]
pub struct BlogsArgs {
    #[command(subcommand)]
    pub action: BlogsCmd,
}

#[derive(Subcommand, Debug)]
pub enum BlogsCmd {
    /// List posts with optional filters
    List {
        /// Case-insensitive substring over title, slug, and excerpt
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<PostStatusArg>,
    },
    /// Create a post, or update one when --id is given
    Save {
        #[arg(long)]
        id: Option<Uuid>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long, default_value_t = PostStatusArg::Draft)]
        status: PostStatusArg,
        #[arg(long)]
        excerpt: String,
        /// Post body HTML
        #[arg(long)]
        content: Option<String>,
        /// Read the post body HTML from a file
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Cover image URL (use `upload` to host one first)
        #[arg(long)]
        cover_image: String,
    },
    /// Delete a post by id
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PostStatusArg {
    Draft,
    Published,
}

impl PostStatusArg {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatusArg::Draft => "draft",
            PostStatusArg::Published => "published",
        }
    }
}

impl fmt::Display for PostStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
