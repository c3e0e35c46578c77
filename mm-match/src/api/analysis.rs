//! Analysis endpoint
//!
//! POST /api/v1/analysis with `{personA, personB}` returns `{score}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;
use tracing::{info, warn};

use mm_common::api::{AnalysisRequest, AnalysisResponse};

use crate::error::{ApiError, ApiResult};
use crate::orchestrator::Role;
use crate::AppState;

/// POST /api/v1/analysis
///
/// 400 for a malformed or invalid body (no report is fetched), 502 when
/// either report fetch fails.
pub async fn create_analysis(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> ApiResult<Json<AnalysisResponse>> {
    let start = Instant::now();

    let Json(request) = body.map_err(|e| {
        warn!(error = %e, "Invalid analysis payload");
        ApiError::BadRequest(e.body_text())
    })?;

    for (role, profile) in [
        (Role::PersonA, &request.person_a),
        (Role::PersonB, &request.person_b),
    ] {
        if let Err(e) = profile.validate() {
            warn!(role = %role, error = %e, "Invalid analysis payload");
            return Err(ApiError::BadRequest(format!("{}: {}", role, e)));
        }
    }

    let result = state
        .analyzer
        .analyze(request.person_a, request.person_b)
        .await;

    info!(
        latency_ms = start.elapsed().as_millis() as u64,
        success = result.is_ok(),
        "Analysis request finished"
    );

    Ok(Json(AnalysisResponse { score: result? }))
}
