//! Error types for the editor service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use common::error::StoreError;

/// Request-level error taxonomy.
///
/// Guard failures (`Unauthorized`, `NotFound`) short-circuit before the
/// store is touched; `Store` failures propagate from the backing stores and
/// are stripped to a generic message at the boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed required field; the message is user-correctable
    /// and surfaced verbatim
    #[error("{0}")]
    Validation(String),

    /// Signup with an email that already has an identity
    #[error("User already exists")]
    DuplicateEmail,

    /// Login secret did not match the stored credential
    #[error("Invalid password")]
    InvalidCredential,

    /// No valid session on a guarded route
    #[error("Unauthorized - Please log in first")]
    Unauthorized,

    /// Reserved: no project path emits this — non-owners are told
    /// `NotFound` so resource existence is never confirmed to them
    #[error("Forbidden")]
    Forbidden,

    /// Resource or identity absent, or present but not owned by the caller
    #[error("Not found")]
    NotFound,

    /// Backing persistence failure
    #[error("store failure")]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredential | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal detail stays in the logs, never in the response body
        let message = match &self {
            ApiError::Store(err) => {
                tracing::error!("store failure: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
