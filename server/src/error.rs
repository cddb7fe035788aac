//! Error responses for the lookup service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leakcheck_core::ValidationError;
use leakcheck_db::DatabaseError;
use serde::Serialize;

/// Body of every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// An error returned from a request handler.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyInput => Self::bad_request("Value parameter is required"),
            ValidationError::InvalidKind { .. } => {
                Self::bad_request("Invalid type. Must be email, phone, or login")
            }
            ValidationError::InconsistentResult { reason } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, reason)
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("Breach store error: {}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
