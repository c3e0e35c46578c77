//! Command-line / environment configuration for mm-match

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Match service configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "mm-match")]
#[command(about = "Match service: compatibility analysis over two birth profiles")]
#[command(version)]
pub struct MatchConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "MATCH_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8083", env = "MATCH_PORT")]
    pub port: u16,

    /// Base URL of the report service
    #[arg(long, default_value = "http://localhost:8085", env = "REPORT_SERVICE_URL")]
    pub report_service_url: String,

    /// HTTP client timeout for report service calls in seconds
    #[arg(long, default_value = "30", env = "REPORT_SERVICE_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,
}

impl MatchConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
