//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::media_storage::MediaError;
use crate::store::StoreError;

/// Error response envelope returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

/// Application error carrying the response status and client message
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 403 Forbidden
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Self { status, message } = self;

        // Log the error based on status code
        match status.as_u16() {
            400..=499 => tracing::warn!("Client error: {status} - {message}"),
            500..=599 => tracing::error!("Server error: {status} - {message}"),
            _ => {}
        }

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Convert store errors to application errors
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            Self::not_found(err.to_string())
        } else {
            tracing::error!("Store persistence failed: {err}");
            Self::internal("Failed to save data")
        }
    }
}

/// Convert media storage errors to application errors
///
/// The upstream error text is surfaced to the caller as a debugging aid.
impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        Self::internal(err.to_string())
    }
}
