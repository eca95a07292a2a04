use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::MessageResponse;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::warn;

/// Request-boundary error: a fixed status plus a `{ "message": ... }` body.
///
/// Service errors are classified here. Disk failures collapse into a generic
/// message, while corrupt data gets its own message. The full detail has
/// already been logged by the store.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Map a failed read. `io_message` is what the caller sees for disk errors.
    pub fn read(err: ServiceError, io_message: &str) -> Self {
        match err {
            ServiceError::Corrupt { .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Stored data is corrupt")
            }
            other => Self::classify(other, io_message),
        }
    }

    /// Map a failed write. `io_message` is what the caller sees for disk errors.
    pub fn write(err: ServiceError, io_message: &str) -> Self {
        Self::classify(err, io_message)
    }

    fn classify(err: ServiceError, io_message: &str) -> Self {
        match err {
            ServiceError::InvalidKey(msg) => Self::bad_request(format!("invalid key: {msg}")),
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, io_message),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::classify(err, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage init failed: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
