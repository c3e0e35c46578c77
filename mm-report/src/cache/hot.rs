//! Hot tier: low-latency, TTL-bound report cache
//!
//! Production uses Redis through a `ConnectionManager` (multiplexed, cheap to
//! clone, reconnects on its own). When no Redis URL is configured the service
//! falls back to [`MemoryHotTier`], an in-process map with the same TTL
//! semantics.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use mm_common::{ReportKey, ReportPayload};

use super::{TierError, MAX_HOT_TTL};

/// Key/value store with per-entry expiry
///
/// A miss is `Ok(None)`, never an error.
#[async_trait]
pub trait HotTier: Send + Sync {
    async fn get(&self, key: &ReportKey) -> Result<Option<ReportPayload>, TierError>;

    async fn set(
        &self,
        key: &ReportKey,
        payload: ReportPayload,
        ttl: Duration,
    ) -> Result<(), TierError>;
}

/// Redis-backed hot tier
#[derive(Clone)]
pub struct RedisHotTier {
    conn: ConnectionManager,
}

impl RedisHotTier {
    /// Connect to Redis (e.g. `redis://127.0.0.1:6379/0`)
    pub async fn connect(url: &str) -> Result<Self, TierError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl HotTier for RedisHotTier {
    async fn get(&self, key: &ReportKey) -> Result<Option<ReportPayload>, TierError> {
        let mut conn = self.conn.clone();
        // Nil reply decodes to None
        let value: Option<Vec<u8>> = conn.get(key.as_str()).await?;
        Ok(value.map(ReportPayload::from))
    }

    async fn set(
        &self,
        key: &ReportKey,
        payload: ReportPayload,
        ttl: Duration,
    ) -> Result<(), TierError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key.as_str(), payload.as_ref(), redis_expiry_secs(ttl))
            .await?;
        Ok(())
    }
}

/// In-process hot tier
///
/// Expired entries are dropped when read, and swept from the whole map on
/// the first write after each sweep interval.
pub struct MemoryHotTier {
    inner: RwLock<MemoryEntries>,
    sweep_interval: Duration,
}

struct MemoryEntries {
    entries: HashMap<ReportKey, (ReportPayload, Instant)>,
    next_sweep: Instant,
}

/// Default interval between sweeps of expired in-process entries
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

impl Default for MemoryHotTier {
    fn default() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }
}

impl MemoryHotTier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sweep_interval(sweep_interval: Duration) -> Self {
        Self {
            inner: RwLock::new(MemoryEntries {
                entries: HashMap::new(),
                next_sweep: deadline(Instant::now(), sweep_interval),
            }),
            sweep_interval,
        }
    }

    /// Number of entries held, including expired ones not yet evicted
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// `now + ttl`, saturating at [`MAX_HOT_TTL`]
fn deadline(now: Instant, ttl: Duration) -> Instant {
    let ttl = ttl.min(MAX_HOT_TTL);
    now.checked_add(ttl).unwrap_or(now)
}

/// Seconds for `SET EX`, which rejects 0
fn redis_expiry_secs(ttl: Duration) -> u64 {
    ttl.min(MAX_HOT_TTL).as_secs().max(1)
}

#[async_trait]
impl HotTier for MemoryHotTier {
    async fn get(&self, key: &ReportKey) -> Result<Option<ReportPayload>, TierError> {
        {
            let inner = self.inner.read().await;
            match inner.entries.get(key) {
                Some((payload, expires_at)) if Instant::now() < *expires_at => {
                    return Ok(Some(payload.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut inner = self.inner.write().await;
        if matches!(inner.entries.get(key), Some((_, expires_at)) if Instant::now() >= *expires_at) {
            inner.entries.remove(key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &ReportKey,
        payload: ReportPayload,
        ttl: Duration,
    ) -> Result<(), TierError> {
        let now = Instant::now();
        let mut inner = self.inner.write().await;

        if now >= inner.next_sweep {
            let before = inner.entries.len();
            inner.entries.retain(|_, (_, expires_at)| now < *expires_at);
            inner.next_sweep = deadline(now, self.sweep_interval);
            debug!(
                evicted = before - inner.entries.len(),
                remaining = inner.entries.len(),
                "Swept expired hot entries"
            );
        }

        inner
            .entries
            .insert(key.clone(), (payload, deadline(now, ttl)));
        Ok(())
    }
}
