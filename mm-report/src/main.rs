//! mm-report - Report microservice
//!
//! Resolves birth-profile reports through the hot and warm cache tiers and
//! the external computation engine. Consumed by mm-match twice per analysis.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use mm_report::cache::{HotTier, MemoryHotTier, RedisHotTier, ReportCache, SqliteWarmTier};
use mm_report::config::ReportConfig;
use mm_report::origin::OriginClient;
use mm_report::resolver::ReportResolver;
use mm_report::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    mm_common::logging::init_tracing("mm_report=info,tower_http=info")?;

    info!(
        "Starting mm-report v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = ReportConfig::parse();

    let hot: Arc<dyn HotTier> = match &config.redis_url {
        Some(url) => {
            let tier = RedisHotTier::connect(url)
                .await
                .context("Failed to connect to Redis")?;
            info!("✓ Hot tier: Redis");
            Arc::new(tier)
        }
        None => {
            warn!("REDIS_URL not set, using in-process hot tier");
            Arc::new(MemoryHotTier::new())
        }
    };

    let warm = SqliteWarmTier::connect(&config.warm_db)
        .await
        .context("Failed to open warm tier database")?;
    info!("✓ Warm tier: {}", config.warm_db);

    let cache = ReportCache::new(hot, Arc::new(warm), config.hot_ttl());

    let origin = OriginClient::new(
        config.engine_url.clone(),
        config.engine_api_key.clone(),
        config.engine_timeout(),
    )
    .context("Failed to build engine client")?;
    info!("Engine: {}", origin.engine_url());

    let state = AppState::new(ReportResolver::new(cache.clone(), origin));
    let app = build_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("mm-report listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(mm_common::shutdown::shutdown_signal())
        .await
        .context("Server error")?;

    info!(
        pending = cache.pending_writes(),
        "Waiting for background cache writes"
    );
    cache.drain().await;

    info!("Server shutdown complete");
    Ok(())
}
