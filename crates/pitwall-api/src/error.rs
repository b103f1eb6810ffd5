//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Firestore error: {0}")]
    Firestore(#[from] pitwall_firestore::FirestoreError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] pitwall_ingest::IngestError),

    #[error("Content error: {0}")]
    Content(#[from] pitwall_content::ContentError),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // A lost publish race is retryable, not a server fault.
            ApiError::Content(e) if e.is_ref_conflict() => StatusCode::CONFLICT,
            ApiError::Internal(_)
            | ApiError::Firestore(_)
            | ApiError::Ingest(_)
            | ApiError::Content(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = match &self {
            ApiError::Internal(_)
            | ApiError::Firestore(_)
            | ApiError::Ingest(_)
            | ApiError::Content(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
                    && status == StatusCode::INTERNAL_SERVER_ERROR
                {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse { detail };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::unauthorized("no header").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("bad token").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("post").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_ref_conflict_maps_to_conflict() {
        let err = ApiError::Content(pitwall_content::ContentError::Github(
            pitwall_github::GithubError::RefConflict("head moved".to_string()),
        ));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
