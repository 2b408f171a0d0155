use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{NewUploadParams, RepoError, UploadsRepo};
use crate::domain::entities::UploadRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(Debug, sqlx::FromRow)]
struct UploadRow {
    id: Uuid,
    filename: String,
    content_type: String,
    size_bytes: i64,
    checksum: String,
    stored_path: String,
    created_at: OffsetDateTime,
}

impl From<UploadRow> for UploadRecord {
    fn from(row: UploadRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            checksum: row.checksum,
            stored_path: row.stored_path,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UploadsRepo for PostgresRepositories {
    async fn record_upload(&self, params: NewUploadParams) -> Result<UploadRecord, RepoError> {
        let row = sqlx::query_as::<_, UploadRow>(
            "INSERT INTO uploads (filename, content_type, size_bytes, checksum, stored_path) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, filename, content_type, size_bytes, checksum, stored_path, created_at",
        )
        .bind(&params.filename)
        .bind(&params.content_type)
        .bind(params.size_bytes)
        .bind(&params.checksum)
        .bind(&params.stored_path)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(UploadRecord::from(row))
    }
}
