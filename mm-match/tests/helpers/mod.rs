//! Test Helper Utilities
//!
//! Scripted report fetcher and fake report service shared by mm-match tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mm_common::api::REPORTS_PATH;
use mm_common::{BirthProfile, ReportPayload};
use mm_match::fetcher::{FetchError, ReportFetcher};

/// How the scripted fetcher answers for one profile (keyed by `dob`)
#[derive(Clone)]
pub enum Outcome {
    Report(&'static [u8]),
    Status(u16),
    Panic,
}

#[derive(Clone)]
pub struct Script {
    pub delay: Duration,
    pub outcome: Outcome,
}

pub fn after(ms: u64, outcome: Outcome) -> Script {
    Script {
        delay: Duration::from_millis(ms),
        outcome,
    }
}

/// In-process fetcher with per-profile delays and outcomes
#[derive(Default)]
pub struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
    started: AtomicUsize,
    finished: AtomicUsize,
    completion_order: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dob: &str, script: Script) -> Self {
        self.scripts.insert(dob.to_string(), script);
        self
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn completion_order(&self) -> Vec<String> {
        self.completion_order.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportFetcher for ScriptedFetcher {
    async fn fetch(&self, profile: &BirthProfile) -> Result<ReportPayload, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .get(&profile.dob)
            .cloned()
            .unwrap_or_else(|| after(0, Outcome::Report(b"{}")));

        tokio::time::sleep(script.delay).await;

        self.completion_order
            .lock()
            .unwrap()
            .push(profile.dob.clone());
        self.finished.fetch_add(1, Ordering::SeqCst);

        match script.outcome {
            Outcome::Report(bytes) => Ok(ReportPayload::from_static(bytes)),
            Outcome::Status(status) => Err(FetchError::Status {
                status,
                body: "scripted failure".to_string(),
            }),
            Outcome::Panic => panic!("scripted panic for {}", profile.dob),
        }
    }
}

pub fn profile(dob: &str) -> BirthProfile {
    BirthProfile::new(dob, "12:00:00", 1.0, 2.0)
}

// =============================================================================
// Fake report service
// =============================================================================

#[derive(Clone)]
struct ReportServiceState {
    responses: Arc<HashMap<String, (StatusCode, &'static str)>>,
    calls: Arc<AtomicUsize>,
}

/// Handle on a running fake report service
pub struct FakeReportService {
    pub url: String,
    calls: Arc<AtomicUsize>,
}

impl FakeReportService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn report_handler(
    State(state): State<ReportServiceState>,
    Json(profile): Json<BirthProfile>,
) -> (StatusCode, &'static str) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state
        .responses
        .get(&profile.dob)
        .copied()
        .unwrap_or((StatusCode::OK, r#"{"report":true}"#))
}

/// Serve a fake mm-report on an ephemeral port; responses are keyed by `dob`
pub async fn spawn_report_service(
    responses: &[(&str, StatusCode, &'static str)],
) -> FakeReportService {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = ReportServiceState {
        responses: Arc::new(
            responses
                .iter()
                .map(|(dob, status, body)| (dob.to_string(), (*status, *body)))
                .collect(),
        ),
        calls: calls.clone(),
    };

    let app = Router::new()
        .route(REPORTS_PATH, post(report_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeReportService {
        url: format!("http://{}", addr),
        calls,
    }
}
