use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scrivano_api_types::{ApiAuthor, ApiPost, BlogListResponse, SavePostRequest};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::posts::{PostAuthor, PostDraft};
use crate::application::repos::PostQueryFilter;
use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;

use super::ApiState;
use super::error::ApiError;

pub fn api_post_from_record(record: PostRecord) -> ApiPost {
    ApiPost {
        id: record.id,
        title: record.title,
        slug: record.slug,
        status: record.status,
        excerpt: record.excerpt,
        content: record.content_html,
        cover_image: record.cover_image,
        author: ApiAuthor {
            id: record.author_id,
            name: record.author_name,
            email: record.author_email,
        },
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    search: Option<String>,
    status: Option<String>,
}

pub async fn list_blogs(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<BlogListResponse>, ApiError> {
    let status = match blank_to_none(query.status) {
        Some(raw) => match PostStatus::parse(&raw) {
            Some(status) => Some(status),
            None => {
                return Err(ApiError::bad_request(format!(
                    "unknown status `{raw}`, expected `draft` or `published`"
                )));
            }
        },
        None => None,
    };

    let filter = PostQueryFilter {
        search: blank_to_none(query.search),
        status,
    };

    let records = state.posts.list(&filter).await?;
    let blogs = records.into_iter().map(api_post_from_record).collect();
    Ok(Json(BlogListResponse { blogs }))
}

pub async fn save_blog(
    State(state): State<ApiState>,
    Json(request): Json<SavePostRequest>,
) -> Result<Response, ApiError> {
    let draft = PostDraft {
        id: request.id,
        title: request.title,
        slug: request.slug,
        status: request.status,
        excerpt: request.excerpt,
        content: request.content,
        cover_image: request.cover_image,
        author: request.author.map(|author| PostAuthor {
            id: author.id,
            name: author.name,
            email: author.email,
        }),
    };

    let saved = state.posts.save(draft).await?;
    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(api_post_from_record(saved.record))).into_response())
}

pub async fn delete_blog(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
