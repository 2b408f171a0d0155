//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{PostRecord, UploadRecord};
use crate::domain::types::PostStatus;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Filter applied to the post listing; blank values mean no restriction.
#[derive(Debug, Clone, Default)]
pub struct PostQueryFilter {
    pub search: Option<String>,
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub content_html: String,
    pub cover_image: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub content_html: String,
    pub cover_image: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
}

#[derive(Debug, Clone)]
pub struct NewUploadParams {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub checksum: String,
    pub stored_path: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// List posts matching the filter, most recently updated first.
    async fn list_posts(&self, filter: &PostQueryFilter) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;

    /// True when a slug is already taken by a post other than `exclude`.
    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;

    /// Returns `RepoError::NotFound` when no such post exists.
    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UploadsRepo: Send + Sync {
    async fn record_upload(&self, params: NewUploadParams) -> Result<UploadRecord, RepoError>;
}
