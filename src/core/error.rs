//! Typed error handling for request processing
//!
//! Handlers signal failures with [`ApiError`] and let the boundary turn
//! them into HTTP responses. The taxonomy is deliberately small:
//!
//! - [`ApiError::InvalidInput`]: a required field is missing or malformed (422)
//! - [`ApiError::NotFound`]: a primary-key lookup or affected-row check missed (404)
//! - [`ApiError::Store`]: an uncategorized storage failure (500)
//!
//! Constraint violations (e.g. inserting a duplicate company code) are not
//! classified specially; they surface as a storage failure with the
//! backend's message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique-key constraint was violated.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// The backend itself failed (e.g. a poisoned lock in the in-memory store).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The database driver reported an error.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The error type returned by all request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A required field is missing or malformed.
    InvalidInput(String),

    /// The requested row does not exist.
    NotFound(String),

    /// The storage layer failed.
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the wire-format error body.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                status: self.status_code().as_u16(),
            },
        }
    }
}

/// Error response envelope: `{"error": {"message": ..., "status": ...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Message and mirrored status code carried inside [`ErrorBody`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_body())).into_response()
    }
}
