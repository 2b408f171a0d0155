mod editor;
mod posts;
mod selectors;
mod shared;

use std::sync::Arc;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::application::posts::PostService;
use crate::config::EditorSettings;
use crate::infra::http::RouterState;

#[derive(Clone)]
pub struct DashboardState {
    pub posts: Arc<PostService>,
    pub editor_bootstrap_json: String,
    pub tinymce_src: String,
}

impl DashboardState {
    pub fn new(posts: Arc<PostService>, editor: &EditorSettings) -> Result<Self, serde_json::Error> {
        let editor_bootstrap_json = crate::application::editor::bootstrap_json(editor)?;
        let tinymce_src = format!(
            "https://cdn.tiny.cloud/1/{}/tinymce/6/tinymce.min.js",
            editor.api_key
        );
        Ok(Self {
            posts,
            editor_bootstrap_json,
            tinymce_src,
        })
    }
}

pub fn build_dashboard_router() -> Router<RouterState> {
    Router::new()
        .route(
            "/dashboard",
            get(|| async { Redirect::permanent("/dashboard/posts") }),
        )
        .route("/dashboard/posts", get(posts::posts_page))
        .route("/dashboard/posts/panel", post(posts::refresh_panel))
        .route("/dashboard/posts/{id}/delete", post(posts::delete_post))
        .route("/dashboard/posts/new", get(editor::new_post_page))
        .route("/dashboard/posts/{id}/edit", get(editor::edit_post_page))
        .route("/dashboard/posts/{id}/preview", get(editor::preview_post))
        .route("/dashboard/posts/save", post(editor::save_post))
        .route("/dashboard/posts/slug", post(editor::derive_slug))
        .route(
            "/dashboard/posts/slug/generate",
            post(editor::regenerate_slug),
        )
}
