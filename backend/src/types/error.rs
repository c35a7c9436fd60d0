//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::supabase::SupabaseError;

/// Error envelope returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code mirrored into the body
    pub status_code: u16,
    /// Human-readable error message
    pub status_message: String,
}

/// Application error type that wraps the HTTP error response
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

    /// Client input error; the message names the missing or invalid field
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Backend operation error; the message is relayed to the caller
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message relayed to the caller
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.message),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.message),
            _ => {}
        }

        let body = ErrorResponse {
            status_code: self.status.as_u16(),
            status_message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Every backend failure is terminal for the request; the backend's own
/// message is relayed verbatim
impl From<SupabaseError> for AppError {
    fn from(err: SupabaseError) -> Self {
        Self::internal(err.to_string())
    }
}
