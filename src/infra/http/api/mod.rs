pub mod error;
mod posts;
mod uploads;

pub use uploads::serve_upload;

use std::num::NonZeroU64;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::application::{posts::PostService, uploads::UploadService};
use crate::infra::db::PostgresRepositories;
use crate::infra::http::RouterState;

#[derive(Clone)]
pub struct ApiState {
    pub posts: Arc<PostService>,
    pub uploads: Arc<UploadService>,
    pub db: Arc<PostgresRepositories>,
    max_request_bytes: NonZeroU64,
}

impl ApiState {
    pub fn new(
        posts: Arc<PostService>,
        uploads: Arc<UploadService>,
        db: Arc<PostgresRepositories>,
        max_request_bytes: NonZeroU64,
    ) -> Self {
        Self {
            posts,
            uploads,
            db,
            max_request_bytes,
        }
    }

    pub fn max_request_bytes(&self) -> NonZeroU64 {
        self.max_request_bytes
    }
}

pub fn build_api_router(max_request_bytes: NonZeroU64) -> Router<RouterState> {
    let upload_limit = usize::try_from(max_request_bytes.get()).unwrap_or(usize::MAX);

    Router::new()
        .route("/blogs", get(posts::list_blogs).put(posts::save_blog))
        .route("/blogs/{id}", delete(posts::delete_blog))
        .route(
            "/upload",
            post(uploads::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
}
