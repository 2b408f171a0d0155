//! Upload workflow: persist the payload to storage, record it, return its URL.

use std::sync::Arc;

use bytes::Bytes;
use metrics::counter;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

use crate::application::repos::{NewUploadParams, RepoError, UploadsRepo};
use crate::domain::entities::UploadRecord;
use crate::infra::uploads::{UploadStorage, UploadStorageError};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file part was supplied")]
    MissingFile,
    #[error(transparent)]
    Storage(#[from] UploadStorageError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("stored path produced an invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A stored upload together with its public URL.
#[derive(Debug, Clone)]
pub struct HostedUpload {
    pub record: UploadRecord,
    pub secure_url: String,
}

pub struct UploadService {
    storage: Arc<UploadStorage>,
    uploads: Arc<dyn UploadsRepo>,
    public_base_url: Url,
}

impl UploadService {
    pub fn new(
        storage: Arc<UploadStorage>,
        uploads: Arc<dyn UploadsRepo>,
        public_base_url: Url,
    ) -> Self {
        Self {
            storage,
            uploads,
            public_base_url,
        }
    }

    /// Store a payload, record its metadata, and return the absolute URL it
    /// will be served from.
    #[instrument(skip(self, data), fields(filename = %filename))]
    pub async fn store(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<HostedUpload, UploadError> {
        let stored = self.storage.store(filename, data).await?;

        let record = self
            .uploads
            .record_upload(NewUploadParams {
                filename: filename.to_string(),
                content_type: content_type.to_string(),
                size_bytes: stored.size_bytes,
                checksum: stored.checksum,
                stored_path: stored.stored_path,
            })
            .await?;

        let secure_url = self
            .public_base_url
            .join(&format!("uploads/{}", record.stored_path))?
            .to_string();

        counter!("scrivano_uploads_stored_total").increment(1);
        info!(
            target = "scrivano::uploads",
            id = %record.id,
            stored_path = %record.stored_path,
            size_bytes = record.size_bytes,
            "upload stored"
        );

        Ok(HostedUpload { record, secure_url })
    }

    pub fn storage(&self) -> &UploadStorage {
        &self.storage
    }
}
