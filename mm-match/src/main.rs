//! mm-match - Match microservice
//!
//! Computes compatibility scores for pairs of birth profiles. Reports are
//! fetched from mm-report, one call per person, in parallel.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use mm_match::config::MatchConfig;
use mm_match::fetcher::HttpReportFetcher;
use mm_match::orchestrator::Analyzer;
use mm_match::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    mm_common::logging::init_tracing("mm_match=info,tower_http=info")?;

    info!(
        "Starting mm-match v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = MatchConfig::parse();

    let fetcher = HttpReportFetcher::new(&config.report_service_url, config.request_timeout())
        .context("Failed to build report service client")?;
    info!("Report service: {}", fetcher.endpoint());

    let state = AppState::new(Analyzer::new(Arc::new(fetcher)));
    let app = build_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("mm-match listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(mm_common::shutdown::shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
