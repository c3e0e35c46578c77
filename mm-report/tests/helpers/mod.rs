//! Test Helper Utilities
//!
//! Fake computation engine and app wiring shared by mm-report tests

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mm_common::BirthProfile;
use mm_report::cache::{MemoryHotTier, ReportCache, SqliteWarmTier, DEFAULT_HOT_TTL};
use mm_report::origin::OriginClient;
use mm_report::resolver::ReportResolver;
use mm_report::{build_router, AppState};

#[derive(Clone)]
struct EngineState {
    status: StatusCode,
    body: &'static str,
    calls: Arc<AtomicUsize>,
    last_auth: Arc<Mutex<Option<String>>>,
    last_profile: Arc<Mutex<Option<BirthProfile>>>,
}

/// Handle on a running fake engine
pub struct FakeEngine {
    pub url: String,
    calls: Arc<AtomicUsize>,
    last_auth: Arc<Mutex<Option<String>>>,
    last_profile: Arc<Mutex<Option<BirthProfile>>>,
}

impl FakeEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_auth(&self) -> Option<String> {
        self.last_auth.lock().unwrap().clone()
    }

    pub fn last_profile(&self) -> Option<BirthProfile> {
        self.last_profile.lock().unwrap().clone()
    }
}

async fn engine_handler(
    State(state): State<EngineState>,
    headers: HeaderMap,
    Json(profile): Json<BirthProfile>,
) -> (StatusCode, &'static str) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last_auth.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_profile.lock().unwrap() = Some(profile);
    (state.status, state.body)
}

/// Serve a fake engine on an ephemeral port answering every request with
/// `status` and `body`
pub async fn spawn_engine(status: StatusCode, body: &'static str) -> FakeEngine {
    let state = EngineState {
        status,
        body,
        calls: Arc::new(AtomicUsize::new(0)),
        last_auth: Arc::new(Mutex::new(None)),
        last_profile: Arc::new(Mutex::new(None)),
    };

    let engine = FakeEngine {
        url: String::new(),
        calls: state.calls.clone(),
        last_auth: state.last_auth.clone(),
        last_profile: state.last_profile.clone(),
    };

    let app = Router::new()
        .route("/report", post(engine_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeEngine {
        url: format!("http://{}/report", addr),
        ..engine
    }
}

/// Report service wired to in-memory tiers
pub struct TestService {
    pub app: Router,
    pub cache: ReportCache,
    pub hot: Arc<MemoryHotTier>,
    pub warm: Arc<SqliteWarmTier>,
}

pub async fn test_service(engine_url: &str, api_key: Option<&str>) -> TestService {
    let hot = Arc::new(MemoryHotTier::new());
    let warm = Arc::new(SqliteWarmTier::in_memory().await.unwrap());
    let cache = ReportCache::new(hot.clone(), warm.clone(), DEFAULT_HOT_TTL);

    let origin = OriginClient::new(
        engine_url,
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap();

    let app = build_router(AppState::new(ReportResolver::new(cache.clone(), origin)));

    TestService {
        app,
        cache,
        hot,
        warm,
    }
}

pub fn sample_profile() -> BirthProfile {
    BirthProfile::new("2000-01-01", "12:00:00", 1.0, 2.0)
}
