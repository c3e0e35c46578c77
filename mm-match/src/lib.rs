//! mm-match library - Match service
//!
//! Scores a pair of birth profiles by fetching both reports from mm-report
//! concurrently and combining them.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod score;

pub use crate::error::{ApiError, ApiResult};

use crate::orchestrator::Analyzer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route(mm_common::api::ANALYSIS_PATH, post(api::create_analysis))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
