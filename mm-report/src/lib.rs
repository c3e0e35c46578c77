//! mm-report library - Report service
//!
//! Serves birth-profile reports from a two-tier cache (hot: Redis or
//! in-process, warm: SQLite documents), falling back to the external
//! computation engine on a full miss.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod origin;
pub mod resolver;

pub use crate::error::{ApiError, ApiResult};

use crate::resolver::ReportResolver;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Cache-then-origin report resolution
    pub resolver: ReportResolver,
}

impl AppState {
    pub fn new(resolver: ReportResolver) -> Self {
        Self { resolver }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route(mm_common::api::REPORTS_PATH, post(api::create_report))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
