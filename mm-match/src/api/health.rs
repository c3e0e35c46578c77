//! Health and liveness endpoints

use axum::{routing::get, Json, Router};

use mm_common::api::{HealthResponse, PingResponse};

use crate::AppState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "mm-match".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ping", get(ping))
}
