//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eventhub_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Tracing or exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    pub(crate) fn response(status: StatusCode, error: &'static str, message: String) -> Response {
        (status, Json(Self { error, message })).into_response()
    }
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
///
/// Denial reasons and store messages stay in the logs; clients only see the
/// fixed message for each status.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self.0 {
            DomainError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "not_found",
                "No result for this search!".to_owned(),
            ),
            DomainError::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "Access to this resource is forbidden".to_owned(),
            ),
            DomainError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message)
            }
            DomainError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "infrastructure_error",
                "internal server error".to_owned(),
            ),
        };

        ErrorBody::response(status, error_code, message)
    }
}
