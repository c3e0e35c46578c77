//! Error types for mm-report

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::origin::OriginError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request body (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Origin engine unreachable or returned an error (502)
    #[error("Engine error: {0}")]
    Origin(#[from] OriginError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            // Engine details stay in the logs
            ApiError::Origin(_) => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "engine error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
