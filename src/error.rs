//! Error types for the todo service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::todos::validation::FieldError;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    /// The row could not be written consistently (busy/locked database,
    /// concurrent modification).
    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Errors surfaced by the request handler, one per HTTP outcome.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Todo item not found")]
    NotFound,

    #[error("Concurrency error while updating")]
    Conflict,

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Validation failed", "errors": errors})),
            )
                .into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Conflict => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Concurrency error while updating"})),
            )
                .into_response(),
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "Storage fault while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal storage error"})),
                )
                    .into_response()
            }
        }
    }
}
