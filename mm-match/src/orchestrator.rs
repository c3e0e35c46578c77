//! Analysis orchestrator
//!
//! Fetches both reports concurrently on two spawned tasks, waits for both,
//! then scores them. Results land in fixed per-role slots, so completion
//! order never matters. If either fetch fails the analysis fails; the
//! sibling fetch is not cancelled and is allowed to finish.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::error;

use mm_common::{BirthProfile, ReportPayload};

use crate::fetcher::{FetchError, ReportFetcher};
use crate::score::score;

/// Which side of the pair a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    PersonA,
    PersonB,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::PersonA => f.write_str("personA"),
            Role::PersonB => f.write_str("personB"),
        }
    }
}

/// Analysis failure; never carries a partial score
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Report fetch for {role} failed: {source}")]
    Fetch {
        role: Role,
        #[source]
        source: FetchError,
    },

    #[error("Report task for {role} did not complete: {reason}")]
    Aborted { role: Role, reason: String },
}

impl AnalysisError {
    pub fn role(&self) -> Role {
        match self {
            AnalysisError::Fetch { role, .. } | AnalysisError::Aborted { role, .. } => *role,
        }
    }
}

/// Per-role outcome of one report fetch
pub type SlotResult = Result<ReportPayload, AnalysisError>;

/// Drives the two report fetches for an analysis
#[derive(Clone)]
pub struct Analyzer {
    fetcher: Arc<dyn ReportFetcher>,
}

impl Analyzer {
    pub fn new(fetcher: Arc<dyn ReportFetcher>) -> Self {
        Self { fetcher }
    }

    /// Score a pair of profiles
    pub async fn analyze(
        &self,
        person_a: BirthProfile,
        person_b: BirthProfile,
    ) -> Result<u32, AnalysisError> {
        let (slot_a, slot_b) = self.fetch_pair(person_a, person_b).await;

        let report_a = slot_a?;
        let report_b = slot_b?;

        Ok(score(&report_a, &report_b))
    }

    /// Fetch both reports concurrently and return them as (A, B)
    ///
    /// Returns only after both tasks have finished. Each failure is logged
    /// here; callers only see the slots.
    pub async fn fetch_pair(
        &self,
        person_a: BirthProfile,
        person_b: BirthProfile,
    ) -> (SlotResult, SlotResult) {
        let task_a = self.spawn_fetch(person_a);
        let task_b = self.spawn_fetch(person_b);

        let (joined_a, joined_b) = tokio::join!(task_a, task_b);

        (
            into_slot(Role::PersonA, joined_a),
            into_slot(Role::PersonB, joined_b),
        )
    }

    fn spawn_fetch(&self, profile: BirthProfile) -> JoinHandle<Result<ReportPayload, FetchError>> {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move { fetcher.fetch(&profile).await })
    }
}

fn into_slot(
    role: Role,
    joined: Result<Result<ReportPayload, FetchError>, JoinError>,
) -> SlotResult {
    let slot = match joined {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(source)) => Err(AnalysisError::Fetch { role, source }),
        Err(e) => Err(AnalysisError::Aborted {
            role,
            reason: e.to_string(),
        }),
    };

    if let Err(e) = &slot {
        error!(role = %role, error = %e, "Failed to fetch report");
    }

    slot
}
