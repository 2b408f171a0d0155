//! Post listing, saving, and deletion workflows shared by the dashboard and API.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::repos::{
    CreatePostParams, PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;
use crate::domain::validation::{PostFields, ValidationErrors, validate_post_fields};

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error(transparent)]
    Validation(ValidationErrors),
    #[error("slug `{slug}` is already in use")]
    DuplicateSlug { slug: String },
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for PostServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

/// The author stamped onto posts when a submission carries none.
#[derive(Debug, Clone)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A submitted post before validation. `id` absent means create.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub author: Option<PostAuthor>,
}

/// Result of a save: the persisted record and whether it was newly created.
#[derive(Debug, Clone)]
pub struct SavedPost {
    pub record: PostRecord,
    pub created: bool,
}

pub struct PostService {
    posts: Arc<dyn PostsRepo>,
    posts_write: Arc<dyn PostsWriteRepo>,
    default_author: PostAuthor,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        posts_write: Arc<dyn PostsWriteRepo>,
        default_author: PostAuthor,
    ) -> Self {
        Self {
            posts,
            posts_write,
            default_author,
        }
    }

    pub async fn list(&self, filter: &PostQueryFilter) -> Result<Vec<PostRecord>, PostServiceError> {
        Ok(self.posts.list_posts(filter).await?)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<PostRecord>, PostServiceError> {
        Ok(self.posts.find_post(id).await?)
    }

    /// Validate and persist a submission, creating when it carries no id.
    #[instrument(skip(self, draft), fields(slug = %draft.slug, status = ?draft.status))]
    pub async fn save(&self, draft: PostDraft) -> Result<SavedPost, PostServiceError> {
        let fields = PostFields {
            title: &draft.title,
            slug: &draft.slug,
            excerpt: &draft.excerpt,
            cover_image: &draft.cover_image,
        };
        validate_post_fields(&fields).map_err(PostServiceError::Validation)?;

        if self.posts.slug_taken(&draft.slug, draft.id).await? {
            return Err(PostServiceError::DuplicateSlug { slug: draft.slug });
        }

        let author = draft.author.unwrap_or_else(|| self.default_author.clone());
        let title = draft.title.trim().to_string();
        let excerpt = draft.excerpt.trim().to_string();

        let saved = match draft.id {
            Some(id) => {
                // Surface missing posts before attempting the write.
                if self.posts.find_post(id).await?.is_none() {
                    return Err(PostServiceError::NotFound);
                }
                let record = self
                    .posts_write
                    .update_post(UpdatePostParams {
                        id,
                        title,
                        slug: draft.slug,
                        status: draft.status,
                        excerpt,
                        content_html: draft.content,
                        cover_image: draft.cover_image,
                        author_id: author.id,
                        author_name: author.name,
                        author_email: author.email,
                    })
                    .await?;
                SavedPost {
                    record,
                    created: false,
                }
            }
            None => {
                let record = self
                    .posts_write
                    .create_post(CreatePostParams {
                        title,
                        slug: draft.slug,
                        status: draft.status,
                        excerpt,
                        content_html: draft.content,
                        cover_image: draft.cover_image,
                        author_id: author.id,
                        author_name: author.name,
                        author_email: author.email,
                    })
                    .await?;
                SavedPost {
                    record,
                    created: true,
                }
            }
        };

        counter!("scrivano_posts_saved_total").increment(1);
        info!(
            target = "scrivano::posts",
            id = %saved.record.id,
            slug = %saved.record.slug,
            created = saved.created,
            "post saved"
        );

        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), PostServiceError> {
        self.posts_write.delete_post(id).await?;
        counter!("scrivano_posts_deleted_total").increment(1);
        info!(target = "scrivano::posts", %id, "post deleted");
        Ok(())
    }
}
