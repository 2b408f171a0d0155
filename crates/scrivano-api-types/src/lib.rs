//! Shared wire types for the Scrivano dashboard API.
//!
//! Both the server and `scrivano-cli` serialize requests and responses
//! through these structs so the JSON contract lives in exactly one place.
//! Timestamps are RFC 3339; field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "post_status", rename_all = "snake_case"))]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAuthor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A post as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub author: ApiAuthor,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Response body of `GET /api/blogs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListResponse {
    pub blogs: Vec<ApiPost>,
}

/// Request body of `PUT /api/blogs`.
///
/// A missing `id` creates a new post; a missing `author` is stamped with
/// the server's configured default author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<ApiAuthor>,
}

/// Response body of `POST /api/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
}

/// Error body returned by the API on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
