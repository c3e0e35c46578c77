//! Error types for mm-match

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::orchestrator::AnalysisError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request body (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A report fetch failed (502)
    #[error("Report service error: {0}")]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Analysis(_) => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "report service error".to_string(),
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
