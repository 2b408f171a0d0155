use std::num::NonZeroU64;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use scrivano::application::posts::{PostAuthor, PostService};
use scrivano::application::repos::{PostsRepo, PostsWriteRepo, UploadsRepo};
use scrivano::application::uploads::UploadService;
use scrivano::config::EditorSettings;
use scrivano::infra::db::PostgresRepositories;
use scrivano::infra::http::{ApiState, DashboardState, RouterState, build_router};
use scrivano::infra::uploads::UploadStorage;

fn build_app(pool: PgPool, uploads_dir: &std::path::Path) -> Router {
    let repos = Arc::new(PostgresRepositories::new(pool));
    let posts_repo: Arc<dyn PostsRepo> = repos.clone();
    let posts_write_repo: Arc<dyn PostsWriteRepo> = repos.clone();
    let uploads_repo: Arc<dyn UploadsRepo> = repos.clone();

    let default_author = PostAuthor {
        id: Uuid::new_v4(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    };
    let posts = Arc::new(PostService::new(
        posts_repo,
        posts_write_repo,
        default_author,
    ));

    let storage =
        Arc::new(UploadStorage::new(uploads_dir.to_path_buf()).expect("upload storage"));
    let public_url = url::Url::parse("https://example.com/").expect("public url");
    let uploads = Arc::new(UploadService::new(storage, uploads_repo, public_url));

    let dashboard =
        DashboardState::new(posts.clone(), &EditorSettings::default()).expect("dashboard state");
    let api = ApiState::new(
        posts,
        uploads,
        repos,
        NonZeroU64::new(8 * 1024 * 1024).expect("limit"),
    );

    build_router(RouterState { dashboard, api })
}

async fn read_text(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    app.clone().oneshot(request).await.expect("response")
}

async fn post_json(app: &Router, uri: &str, body: Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    app.clone().oneshot(request).await.expect("response")
}

async fn seed_post(app: &Router, title: &str, slug: &str, status: &str, content: &str) -> Value {
    let body = json!({
        "title": title,
        "slug": slug,
        "status": status,
        "excerpt": "A long enough excerpt.",
        "content": content,
        "coverImage": "https://example.com/uploads/c.png",
    });
    let request = Request::builder()
        .method("PUT")
        .uri("/api/blogs")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn editor_signals(title: &str, slug: &str) -> Value {
    json!({
        "id": "",
        "title": title,
        "slug": slug,
        "slugIsDerived": true,
        "status": "draft",
        "excerpt": "A long enough excerpt.",
        "content": "<p>Body</p>",
        "coverImage": "https://example.com/uploads/c.png",
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_redirects_to_posts(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = get(&app, "/dashboard").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).expect("location"),
        "/dashboard/posts"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn posts_page_renders_a_row_per_post(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    seed_post(&app, "Rust Memory Model", "rust-memory-model", "published", "<p>A</p>").await;
    seed_post(&app, "Gardening Notes", "gardening-notes", "draft", "<p>B</p>").await;

    let response = get(&app, "/dashboard/posts").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;

    assert!(html.contains("data-dashboard-panel=\"posts\""));
    assert!(html.contains("Rust Memory Model"));
    assert!(html.contains("Gardening Notes"));
    assert!(html.contains("badge-published"));
    assert!(html.contains("badge-draft"));
    assert!(html.contains("Ada Lovelace"));
}

#[sqlx::test(migrations = "./migrations")]
async fn posts_page_announces_a_save(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = get(&app, "/dashboard/posts?saved=My+Title").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;
    assert!(html.contains("Saved"));
    assert!(html.contains("My Title"));
}

#[sqlx::test(migrations = "./migrations")]
async fn panel_refresh_applies_filters(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    seed_post(&app, "Rust Memory Model", "rust-memory-model", "published", "<p>A</p>").await;
    seed_post(&app, "Gardening Notes", "gardening-notes", "draft", "<p>B</p>").await;

    let response = post_json(
        &app,
        "/dashboard/posts/panel",
        json!({"search": "rust", "status": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;

    assert!(events.contains("data-dashboard-panel=\"posts\""));
    assert!(events.contains("Rust Memory Model"));
    assert!(!events.contains("Gardening Notes"));
}

#[sqlx::test(migrations = "./migrations")]
async fn save_success_navigates_back_to_listing(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = post_json(
        &app,
        "/dashboard/posts/save",
        editor_signals("Hello World", "hello-world"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;
    assert!(events.contains("window.location.assign('/dashboard/posts?saved="));
}

#[sqlx::test(migrations = "./migrations")]
async fn save_validation_rerenders_panel_with_errors(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = post_json(
        &app,
        "/dashboard/posts/save",
        editor_signals("Hi", "hi"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;

    assert!(events.contains("data-role=\"panel\""));
    assert!(events.contains("Title must be at least"));
    assert!(events.contains("Slug must be at least"));
    assert!(events.contains("submitting"));
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_save_reboots_the_content_editor(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    // Replacing the form panel destroys the rich-text widget, so every
    // panel-patching failure must also ask the adapter to rebind.
    let response = post_json(&app, "/dashboard/posts/save", editor_signals("Hi", "hi")).await;
    let events = read_text(response).await;
    assert!(events.contains("scrivanoEditor.rebind()"));

    seed_post(&app, "Hello World", "hello-world", "draft", "<p>A</p>").await;
    let response = post_json(
        &app,
        "/dashboard/posts/save",
        editor_signals("Hello Again", "hello-world"),
    )
    .await;
    let events = read_text(response).await;
    assert!(events.contains("scrivanoEditor.rebind()"));
}

#[sqlx::test(migrations = "./migrations")]
async fn save_rejects_an_unknown_status(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let mut signals = editor_signals("Hello World", "hello-world");
    signals["status"] = json!("archived");

    let response = post_json(&app, "/dashboard/posts/save", signals).await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;
    assert!(events.contains("Status must be draft or published"));
    assert!(!events.contains("window.location.assign"));

    let listing = get(&app, "/dashboard/posts").await;
    let html = read_text(listing).await;
    assert!(!html.contains("Hello World"));
}

#[sqlx::test(migrations = "./migrations")]
async fn save_duplicate_slug_flags_the_slug_field(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    seed_post(&app, "Hello World", "hello-world", "draft", "<p>A</p>").await;

    let response = post_json(
        &app,
        "/dashboard/posts/save",
        editor_signals("Hello Again", "hello-world"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;
    assert!(events.contains("already in use"));
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_rebuilds_panel_and_clears_dialog(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let created = seed_post(&app, "Hello World", "hello-world", "draft", "<p>A</p>").await;
    let id = created["id"].as_str().expect("id");

    let response = post_json(
        &app,
        &format!("/dashboard/posts/{id}/delete"),
        json!({"search": "", "status": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;

    assert!(events.contains("Post deleted"));
    assert!(events.contains("deleteId"));
    assert!(!events.contains("Hello World"));
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_failure_keeps_listing_and_dialog(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    seed_post(&app, "Hello World", "hello-world", "draft", "<p>A</p>").await;

    let response = post_json(
        &app,
        &format!("/dashboard/posts/{}/delete", Uuid::new_v4()),
        json!({"search": "", "status": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;

    // Only the error toast is streamed: no panel rebuild, no dialog reset.
    assert!(events.contains("Post was already deleted"));
    assert!(!events.contains("data-dashboard-panel=\"posts\""));
    assert!(!events.contains("deleteId"));

    let listing = get(&app, "/dashboard/posts").await;
    let html = read_text(listing).await;
    assert!(html.contains("Hello World"));
}

#[sqlx::test(migrations = "./migrations")]
async fn preview_strips_scripts_from_content(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let created = seed_post(
        &app,
        "Hello World",
        "hello-world",
        "draft",
        "<p>Safe</p><script>alert(1)</script>",
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let response = get(&app, &format!("/dashboard/posts/{id}/preview")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;

    assert!(html.contains("<p>Safe</p>"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("alert(1)"));
}

#[sqlx::test(migrations = "./migrations")]
async fn slug_follows_title_while_derived(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = post_json(
        &app,
        "/dashboard/posts/slug",
        json!({"title": "Hello World", "slug": "", "slugIsDerived": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;
    assert!(events.contains("hello-world"));
}

#[sqlx::test(migrations = "./migrations")]
async fn slug_stops_following_after_manual_edit(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = post_json(
        &app,
        "/dashboard/posts/slug",
        json!({"title": "Hello World", "slug": "my-own-slug", "slugIsDerived": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;
    assert!(!events.contains("hello-world"));
}

#[sqlx::test(migrations = "./migrations")]
async fn regenerate_restores_the_derived_slug(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let response = post_json(
        &app,
        "/dashboard/posts/slug/generate",
        json!({"title": "Hello World", "slug": "my-own-slug", "slugIsDerived": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let events = read_text(response).await;
    assert!(events.contains("hello-world"));
    assert!(events.contains("slugIsDerived"));
}

#[sqlx::test(migrations = "./migrations")]
async fn edit_page_bootstraps_saved_signals(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_app(pool, dir.path());

    let created = seed_post(&app, "Hello World", "hello-world", "published", "<p>A</p>").await;
    let id = created["id"].as_str().expect("id");

    let response = get(&app, &format!("/dashboard/posts/{id}/edit")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;

    assert!(html.contains("hello-world"));
    assert!(html.contains("data-role=\"panel\""));
    // The stored slug stays pinned until the user regenerates it.
    assert!(html.contains("slugIsDerived&quot;:false"));

    let missing = get(&app, &format!("/dashboard/posts/{}/edit", Uuid::new_v4())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
