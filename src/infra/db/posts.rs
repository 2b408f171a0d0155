use async_trait::async_trait;
use sqlx::QueryBuilder;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    CreatePostParams, PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::PostRecord;
use crate::domain::types::PostStatus;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

const POST_COLUMNS: &str = "id, title, slug, status, excerpt, content_html, cover_image, \
     author_id, author_name, author_email, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: String,
    status: PostStatus,
    excerpt: String,
    content_html: String,
    cover_image: String,
    author_id: Uuid,
    author_name: String,
    author_email: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            status: row.status,
            excerpt: row.excerpt,
            content_html: row.content_html,
            cover_image: row.cover_image,
            author_id: row.author_id,
            author_name: row.author_name,
            author_email: row.author_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self, filter: &PostQueryFilter) -> Result<Vec<PostRecord>, RepoError> {
        let mut qb = QueryBuilder::new(
            "SELECT p.id, p.title, p.slug, p.status, p.excerpt, p.content_html, \
             p.cover_image, p.author_id, p.author_name, p.author_email, \
             p.created_at, p.updated_at FROM posts p WHERE 1=1 ",
        );

        Self::apply_post_filter(&mut qb, filter);
        qb.push(" ORDER BY p.updated_at DESC, p.id DESC ");

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(taken)
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, slug, status, excerpt, content_html, cover_image, \
             author_id, author_name, author_email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&params.title)
        .bind(&params.slug)
        .bind(params.status)
        .bind(&params.excerpt)
        .bind(&params.content_html)
        .bind(&params.cover_image)
        .bind(params.author_id)
        .bind(&params.author_name)
        .bind(&params.author_email)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET title = $2, slug = $3, status = $4, excerpt = $5, \
             content_html = $6, cover_image = $7, author_id = $8, author_name = $9, \
             author_email = $10, updated_at = now() \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(params.id)
        .bind(&params.title)
        .bind(&params.slug)
        .bind(params.status)
        .bind(&params.excerpt)
        .bind(&params.content_html)
        .bind(&params.cover_image)
        .bind(params.author_id)
        .bind(&params.author_name)
        .bind(&params.author_email)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)?;

        Ok(PostRecord::from(row))
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
