//! Command-line / environment configuration for mm-report

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use crate::cache::MAX_HOT_TTL_SECS;

/// Report service configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "mm-report")]
#[command(about = "Report service: tiered report cache in front of the computation engine")]
#[command(version)]
pub struct ReportConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "REPORT_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8085", env = "REPORT_PORT")]
    pub port: u16,

    /// Redis URL for the hot tier; an in-process tier is used when unset
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// SQLite URL for the warm tier
    #[arg(long, default_value = "sqlite://reports.db?mode=rwc", env = "WARM_DATABASE_URL")]
    pub warm_db: String,

    /// Report computation engine endpoint
    #[arg(long, env = "ASTROLOGY_ENGINE_URL")]
    pub engine_url: String,

    /// Bearer credential for the engine
    #[arg(long, env = "ASTROLOGY_ENGINE_API_KEY", hide_env_values = true)]
    pub engine_api_key: Option<String>,

    /// Hot tier entry lifetime in seconds
    #[arg(
        long,
        default_value = "3600",
        env = "REPORT_HOT_TTL_SECS",
        value_parser = clap::value_parser!(u64).range(1..=MAX_HOT_TTL_SECS)
    )]
    pub hot_ttl_secs: u64,

    /// HTTP client timeout for engine calls in seconds
    #[arg(long, default_value = "30", env = "ASTROLOGY_ENGINE_TIMEOUT_SECS")]
    pub engine_timeout_secs: u64,
}

impl ReportConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn hot_ttl(&self) -> Duration {
        Duration::from_secs(self.hot_ttl_secs)
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }
}
