//! Tracing bootstrap shared by all service binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Error, Result};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` is used
/// (e.g. `"mm_report=info,tower_http=info"`).
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
