#![deny(clippy::all, clippy::pedantic)]

use httpmock::MockServer;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::args::{BlogsCmd, Cli, Commands, PostStatusArg};
use crate::client::{CliError, Ctx, build_ctx_from_cli};
use crate::handlers::{blogs, uploads};

fn ctx(server: &MockServer) -> Ctx {
    Ctx::new(&server.base_url()).expect("ctx")
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

fn post_json(id: Uuid) -> String {
    format!(
        r#"{{"id":"{id}","title":"Hello World","slug":"hello-world","status":"draft","excerpt":"An opening post.","content":"<p>Hi</p>","coverImage":"https://example.com/c.png","author":{{"id":"{id}","name":"Ada","email":"ada@example.com"}},"createdAt":"2026-08-23T10:00:00Z","updatedAt":"2026-08-23T10:00:00Z"}}"#
    )
}

#[test]
fn build_ctx_errors_without_site() {
    let cli = Cli {
        site: None,
        command: Commands::Blogs(crate::args::BlogsArgs {
            action: BlogsCmd::List {
                search: None,
                status: None,
            },
        }),
    };

    let err = build_ctx_from_cli(&cli).expect_err("missing site should fail");
    assert!(matches!(err, CliError::MissingSite));
}

#[test]
fn read_value_prefers_file_over_inline() -> Result<(), CliError> {
    let file = tmp_file("from-file");
    let val = crate::io::read_value(Some("inline".into()), Some(file.path().to_path_buf()))?;
    assert_eq!(val, "from-file");
    Ok(())
}

#[tokio::test]
async fn blogs_list_sends_filters() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/blogs")
            .query_param("search", "hello")
            .query_param("status", "published");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"blogs":[]}"#);
    });

    let ctx = ctx(&server);
    blogs::handle(
        &ctx,
        crate::args::BlogsArgs {
            action: BlogsCmd::List {
                search: Some("hello".into()),
                status: Some(PostStatusArg::Published),
            },
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn blogs_save_reads_content_file() -> Result<(), CliError> {
    let server = MockServer::start();
    let id = Uuid::new_v4();
    let mock = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/blogs")
            .json_body_partial(r#"{"title":"Hello World","slug":"hello-world","content":"<p>Hi</p>"}"#);
        then.status(201)
            .header("content-type", "application/json")
            .body(post_json(id));
    });

    let content_file = tmp_file("<p>Hi</p>");
    let ctx = ctx(&server);
    blogs::handle(
        &ctx,
        crate::args::BlogsArgs {
            action: BlogsCmd::Save {
                id: None,
                title: "Hello World".into(),
                slug: "hello-world".into(),
                status: PostStatusArg::Draft,
                excerpt: "An opening post.".into(),
                content: None,
                content_file: Some(content_file.path().to_path_buf()),
                cover_image: "https://example.com/c.png".into(),
            },
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn blogs_delete_hits_endpoint() -> Result<(), CliError> {
    let server = MockServer::start();
    let id = Uuid::new_v4();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path(format!("/api/blogs/{id}"));
        then.status(204);
    });

    let ctx = ctx(&server);
    blogs::handle(
        &ctx,
        crate::args::BlogsArgs {
            action: BlogsCmd::Delete { id },
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn blogs_delete_surfaces_not_found() {
    let server = MockServer::start();
    let id = Uuid::new_v4();
    server.mock(|when, then| {
        when.method("DELETE").path(format!("/api/blogs/{id}"));
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"error":"post not found"}"#);
    });

    let ctx = ctx(&server);
    let err = blogs::handle(
        &ctx,
        crate::args::BlogsArgs {
            action: BlogsCmd::Delete { id },
        },
    )
    .await
    .expect_err("404 should fail");
    assert!(matches!(err, CliError::Server(_)));
}

#[tokio::test]
async fn upload_posts_multipart_file() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path("/api/upload");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"secure_url":"https://example.com/uploads/2026/08/abc.png"}"#);
    });

    let file = tmp_file("pretend-image-bytes");
    let ctx = ctx(&server);
    uploads::upload(&ctx, file.path()).await?;
    mock.assert();
    Ok(())
}
