//! HTTP error envelope.
//!
//! Every failure leaves the service as `{"success": false, "error": "<message>"}`
//! with a status chosen by [`ErrorCode`].

use crate::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or malformed request fields.
    InvalidInput,
    NotFound,
    /// The AI provider failed or returned unusable output, with nothing cached.
    GenerationFailed,
    StoreUnavailable,
    InternalError,
}

impl ErrorCode {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::GenerationFailed
            | ErrorCode::StoreUnavailable
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "error": self.message });
        (self.status_code(), Json(body)).into_response()
    }
}

/// Map service errors to responses. Provider and parser messages are public;
/// store and internal details stay in the logs.
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message, .. } => ApiError::invalid_input(message),
            Error::Generation { message, .. } | Error::MalformedOutput { message, .. } => {
                ApiError::new(ErrorCode::GenerationFailed, message)
            }
            Error::Store(e) => {
                tracing::error!(error = %e, "content store failure");
                ApiError::new(ErrorCode::StoreUnavailable, "Content store is unavailable.")
            }
            other => {
                tracing::error!(error = %other, "unexpected error");
                ApiError::internal_error("An unexpected error occurred on the server.")
            }
        }
    }
}
