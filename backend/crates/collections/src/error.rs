//! Collection Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Collection-specific result type alias
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Collection-specific error variants
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Malformed request body or field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Owner already has a collection with this title
    #[error("Collection with that title already exists")]
    Duplicate,

    /// Collection exists but belongs to someone else
    #[error("You do not own this collection")]
    NotOwner,

    /// No such collection
    #[error("Collection not found")]
    NotFound,

    /// The collection exists but holds no card with that id
    #[error("Card not found")]
    CardNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CollectionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CollectionError::Validation(_) => StatusCode::BAD_REQUEST,
            CollectionError::Duplicate => StatusCode::CONFLICT,
            CollectionError::NotOwner => StatusCode::FORBIDDEN,
            CollectionError::NotFound | CollectionError::CardNotFound => StatusCode::NOT_FOUND,
            CollectionError::Database(_) | CollectionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectionError::Validation(_) => ErrorKind::BadRequest,
            CollectionError::Duplicate => ErrorKind::Conflict,
            CollectionError::NotOwner => ErrorKind::Forbidden,
            CollectionError::NotFound | CollectionError::CardNotFound => ErrorKind::NotFound,
            CollectionError::Database(_) | CollectionError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server faults collapse into a generic message; raw database
    /// errors never reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            CollectionError::Database(_) | CollectionError::Internal(_) => {
                AppError::internal("Something went wrong")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }
}

impl IntoResponse for CollectionError {
    fn into_response(self) -> Response {
        match &self {
            CollectionError::Database(e) => {
                tracing::error!(error = %e, "Collection database error");
            }
            CollectionError::Internal(msg) => {
                tracing::error!(message = %msg, "Collection internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Collection error");
            }
        }
        self.to_app_error().into_response()
    }
}

impl From<serde_json::Error> for CollectionError {
    fn from(err: serde_json::Error) -> Self {
        CollectionError::Internal(format!("Card payload serialization failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CollectionError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CollectionError::Duplicate.status_code(), StatusCode::CONFLICT);
        assert_eq!(CollectionError::NotOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(CollectionError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            CollectionError::CardNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CollectionError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
