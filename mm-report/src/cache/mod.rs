//! Two-tier report cache
//!
//! Lookup order is hot tier, then warm tier. A warm hit repopulates the hot
//! tier in the background. Write-back after an origin fetch schedules two
//! independent background writes, one per tier.
//!
//! Tier failures never reach the caller: a failed read is logged and treated
//! as a miss, a failed write is logged and dropped. Background writes run on
//! a [`TaskTracker`] so shutdown can wait for them; the request path never
//! awaits them.
//!
//! There is no per-key in-flight de-duplication. Concurrent lookups for the
//! same cold key each miss and each trigger their own origin fetch and
//! write-back. Write-back is idempotent for a given key, so the only cost is
//! duplicate origin load.

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::task::TaskTracker;
use tracing::{debug, error};

use mm_common::{ReportKey, ReportPayload};

mod hot;
mod warm;

pub use hot::{HotTier, MemoryHotTier, RedisHotTier};
pub use warm::{SqliteWarmTier, WarmDocument, WarmTier};

/// Default hot tier entry lifetime
pub const DEFAULT_HOT_TTL: Duration = Duration::from_secs(60 * 60);

/// Longest hot tier entry lifetime; larger TTLs are clamped to it
pub const MAX_HOT_TTL: Duration = Duration::from_secs(MAX_HOT_TTL_SECS);

pub const MAX_HOT_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Cache tier operation failure
#[derive(Debug, Error)]
pub enum TierError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Tier unavailable: {0}")]
    Unavailable(String),
}

/// Which tier answered a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Hot,
    Warm,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Hot => f.write_str("hot"),
            Tier::Warm => f.write_str("warm"),
        }
    }
}

/// Successful cache lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    pub payload: ReportPayload,
    pub tier: Tier,
}

/// Report cache engine
///
/// Owns its tier handles; cloning shares them along with the background
/// task tracker.
#[derive(Clone)]
pub struct ReportCache {
    hot: Arc<dyn HotTier>,
    warm: Arc<dyn WarmTier>,
    hot_ttl: Duration,
    background: TaskTracker,
}

impl ReportCache {
    pub fn new(hot: Arc<dyn HotTier>, warm: Arc<dyn WarmTier>, hot_ttl: Duration) -> Self {
        Self {
            hot,
            warm,
            hot_ttl,
            background: TaskTracker::new(),
        }
    }

    /// Tiered lookup
    ///
    /// Returns `None` when both tiers miss (or are unavailable); the caller
    /// is then responsible for fetching from origin and calling
    /// [`write_back`](Self::write_back).
    pub async fn lookup(&self, key: &ReportKey) -> Option<CacheHit> {
        match self.hot.get(key).await {
            Ok(Some(payload)) => {
                return Some(CacheHit {
                    payload,
                    tier: Tier::Hot,
                })
            }
            Ok(None) => {}
            Err(e) => {
                error!(key = %key, tier = "hot", error = %e, "Hot tier get failed");
            }
        }

        match self.warm.find(key).await {
            Ok(Some(doc)) => {
                self.spawn_hot_set(key.clone(), doc.report.clone());
                Some(CacheHit {
                    payload: doc.report,
                    tier: Tier::Warm,
                })
            }
            Ok(None) => None,
            Err(e) => {
                error!(key = %key, tier = "warm", error = %e, "Warm tier find failed");
                None
            }
        }
    }

    /// Schedule persistence of a freshly fetched payload into both tiers
    ///
    /// Returns immediately. The two writes are independent: either may fail
    /// without affecting the other.
    pub fn write_back(&self, key: ReportKey, payload: ReportPayload) {
        self.spawn_hot_set(key.clone(), payload.clone());

        let warm = Arc::clone(&self.warm);
        self.background.spawn(async move {
            match warm.upsert(&key, payload, Utc::now()).await {
                Ok(()) => debug!(key = %key, tier = "warm", "Warm tier upserted"),
                Err(e) => error!(key = %key, tier = "warm", error = %e, "Warm tier upsert failed"),
            }
        });
    }

    fn spawn_hot_set(&self, key: ReportKey, payload: ReportPayload) {
        let hot = Arc::clone(&self.hot);
        let ttl = self.hot_ttl;
        self.background.spawn(async move {
            match hot.set(&key, payload, ttl).await {
                Ok(()) => debug!(key = %key, tier = "hot", "Hot tier set"),
                Err(e) => error!(key = %key, tier = "hot", error = %e, "Hot tier set failed"),
            }
        });
    }

    /// Number of background tier writes still running
    pub fn pending_writes(&self) -> usize {
        self.background.len()
    }

    /// Wait for every background tier write scheduled so far
    ///
    /// Used at shutdown and by tests. New writes may be scheduled again once
    /// this returns.
    pub async fn drain(&self) {
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }
}
