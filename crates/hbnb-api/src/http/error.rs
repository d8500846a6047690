//! Application error type mapping to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hbnb_types::error::StorageError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Storage(StorageError),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Storage(StorageError::NotReady) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Storage not ready".to_string())
            }
            AppError::Storage(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
