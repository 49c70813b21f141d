//! Unified error handling for the HTTP layer.
//!
//! Every failure is converted into a JSON body of the form
//! `{"error": "<message>"}`. The message is the error's own text: lead
//! endpoints expose the raw cause to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Request shape
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    MalformedBody(String),

    #[error("invalid limit {0}")]
    InvalidLimit(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("{0}")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::MalformedBody(_) => "MALFORMED_BODY",
            AppError::InvalidLimit(_) => "INVALID_LIMIT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code.
    ///
    /// Only a wrong verb is a client error. Bad bodies and bad `limit` values
    /// are answered like any other fault, with 500.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidLimit(_) => StatusCode::INTERNAL_SERVER_ERROR,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "Request failed: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn malformed_body(msg: impl Into<String>) -> Self {
        AppError::MalformedBody(msg.into())
    }

    pub fn invalid_limit(msg: impl Into<String>) -> Self {
        AppError::InvalidLimit(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
