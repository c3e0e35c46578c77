//! Report endpoint
//!
//! POST /internal/v1/reports with a `BirthProfile` body returns the raw
//! report bytes for that profile.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::{HeaderName, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use mm_common::BirthProfile;

use crate::error::{ApiError, ApiResult};
use crate::resolver::ReportSource;
use crate::AppState;

/// Response header naming the tier (or engine) that served the report
pub const REPORT_SOURCE_HEADER: &str = "x-report-source";

/// POST /internal/v1/reports
///
/// 400 for a malformed or invalid profile (nothing downstream is touched),
/// 502 when the engine fails. Cache tier problems never change the status.
pub async fn create_report(
    State(state): State<AppState>,
    body: Result<Json<BirthProfile>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(profile) = body.map_err(|e| {
        warn!(error = %e, "Invalid report payload");
        ApiError::BadRequest(e.body_text())
    })?;

    if let Err(e) = profile.validate() {
        warn!(error = %e, "Invalid report payload");
        return Err(ApiError::BadRequest(e.to_string()));
    }

    let (report, source) = state.resolver.resolve(&profile).await.map_err(|e| {
        error!(error = %e, "Engine request failed");
        ApiError::from(e)
    })?;

    let source = match source {
        ReportSource::Hot => "hot",
        ReportSource::Warm => "warm",
        ReportSource::Origin => "origin",
    };

    Ok((
        [
            (CONTENT_TYPE, "application/json"),
            (HeaderName::from_static(REPORT_SOURCE_HEADER), source),
        ],
        report,
    )
        .into_response())
}
