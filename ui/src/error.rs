//! Errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mcore::QuoteError;
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Unknown bridge request
    #[error("{0}")]
    NotFound(String),

    /// Failure of the underlying store
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Storage(err) => {
                tracing::error!("Storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
