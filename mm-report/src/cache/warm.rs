//! Warm tier: durable report documents
//!
//! Documents are keyed by report key and hold the payload plus the time it
//! was written. They never expire; a write-back for an existing key
//! overwrites it in place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use mm_common::{ReportKey, ReportPayload};

use super::TierError;

/// Stored report document
#[derive(Debug, Clone, PartialEq)]
pub struct WarmDocument {
    pub report: ReportPayload,
    pub created_at: DateTime<Utc>,
}

/// Document store addressed by report key
///
/// Not-found is `Ok(None)`, never an error.
#[async_trait]
pub trait WarmTier: Send + Sync {
    async fn find(&self, key: &ReportKey) -> Result<Option<WarmDocument>, TierError>;

    async fn upsert(
        &self,
        key: &ReportKey,
        report: ReportPayload,
        created_at: DateTime<Utc>,
    ) -> Result<(), TierError>;
}

const CREATE_REPORTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS reports (
        id TEXT PRIMARY KEY,
        report BLOB NOT NULL,
        created_at TEXT NOT NULL
    )
"#;

/// SQLite-backed warm tier
#[derive(Clone)]
pub struct SqliteWarmTier {
    pool: SqlitePool,
}

impl SqliteWarmTier {
    /// Open (creating if missing) the database at `url`, e.g.
    /// `sqlite://reports.db?mode=rwc`
    pub async fn connect(url: &str) -> Result<Self, TierError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Single-connection in-memory store (tests, throwaway runs)
    ///
    /// Each SQLite memory connection is a separate database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, TierError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, ensuring the schema exists
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, TierError> {
        sqlx::query(CREATE_REPORTS_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl WarmTier for SqliteWarmTier {
    async fn find(&self, key: &ReportKey) -> Result<Option<WarmDocument>, TierError> {
        let row = sqlx::query_as::<_, (Vec<u8>, DateTime<Utc>)>(
            "SELECT report, created_at FROM reports WHERE id = ?",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(report, created_at)| WarmDocument {
            report: ReportPayload::from(report),
            created_at,
        }))
    }

    async fn upsert(
        &self,
        key: &ReportKey,
        report: ReportPayload,
        created_at: DateTime<Utc>,
    ) -> Result<(), TierError> {
        sqlx::query(
            r#"
            INSERT INTO reports (id, report, created_at) VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                report = excluded.report,
                created_at = excluded.created_at
            "#,
        )
        .bind(key.as_str())
        .bind(report.as_ref())
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
