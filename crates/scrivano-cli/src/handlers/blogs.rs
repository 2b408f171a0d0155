#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use scrivano_api_types::{ApiPost, BlogListResponse, PostStatus, SavePostRequest};

use crate::args::{BlogsArgs, BlogsCmd, PostStatusArg};
use crate::client::{CliError, Ctx};
use crate::{io, print};

pub async fn handle(ctx: &Ctx, args: BlogsArgs) -> Result<(), CliError> {
    match args.action {
        BlogsCmd::List { search, status } => list(ctx, search, status).await,
        BlogsCmd::Save {
            id,
            title,
            slug,
            status,
            excerpt,
            content,
            content_file,
            cover_image,
        } => {
            let content = io::read_value(content, content_file)?;
            let req = SavePostRequest {
                id,
                title,
                slug,
                status: match status {
                    PostStatusArg::Draft => PostStatus::Draft,
                    PostStatusArg::Published => PostStatus::Published,
                },
                excerpt,
                content,
                cover_image,
                author: None,
            };
            save(ctx, req).await
        }
        BlogsCmd::Delete { id } => delete(ctx, id).await,
    }
}

async fn list(
    ctx: &Ctx,
    search: Option<String>,
    status: Option<PostStatusArg>,
) -> Result<(), CliError> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(search) = search {
        query.push(("search", search));
    }
    if let Some(status) = status {
        query.push(("status", status.as_str().to_owned()));
    }

    let query = if query.is_empty() {
        None
    } else {
        Some(query.as_slice())
    };
    let resp: BlogListResponse = ctx
        .request(Method::GET, "api/blogs", query, None)
        .await?;
    print::print_json(&resp)
}

async fn save(ctx: &Ctx, req: SavePostRequest) -> Result<(), CliError> {
    let body = io::to_value(req)?;
    let post: ApiPost = ctx
        .request(Method::PUT, "api/blogs", None, Some(body))
        .await?;
    print::print_json(&post)
}

async fn delete(ctx: &Ctx, id: uuid::Uuid) -> Result<(), CliError> {
    ctx.request_no_body(Method::DELETE, &format!("api/blogs/{id}"), None)
        .await?;
    println!("deleted {id}");
    Ok(())
}
