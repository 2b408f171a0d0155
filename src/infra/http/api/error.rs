use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scrivano_api_types::ApiErrorBody;

use crate::application::error::ErrorReport;
use crate::application::posts::PostServiceError;
use crate::application::repos::RepoError;
use crate::application::uploads::UploadError;

/// JSON error envelope for the REST surface: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.message.clone(),
        };
        let mut response = (self.status, Json(body)).into_response();
        // Attach a structured report so shared logging middleware can emit rich diagnostics.
        ErrorReport::from_message("infra::http::api", self.status, self.message)
            .attach(&mut response);
        response
    }
}

fn repo_error_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => {
            ApiError::conflict(format!("duplicate record violates `{constraint}`"))
        }
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::InvalidInput { message } => ApiError::bad_request(message),
        RepoError::Integrity { message } => ApiError::conflict(message),
        RepoError::Timeout => {
            ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "database timeout")
        }
        RepoError::Persistence(message) => ApiError::internal(message),
    }
}

impl From<PostServiceError> for ApiError {
    fn from(err: PostServiceError) -> Self {
        match err {
            PostServiceError::Validation(errors) => ApiError::unprocessable(errors.summary()),
            PostServiceError::DuplicateSlug { slug } => {
                ApiError::conflict(format!("slug `{slug}` is already in use"))
            }
            PostServiceError::NotFound => ApiError::not_found("post not found"),
            PostServiceError::Repo(repo) => repo_error_to_api(repo),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile => {
                ApiError::bad_request("multipart request is missing a `file` part")
            }
            UploadError::Storage(storage) => ApiError::internal(storage.to_string()),
            UploadError::Repo(repo) => repo_error_to_api(repo),
            UploadError::Url(parse) => ApiError::internal(parse.to_string()),
        }
    }
}
