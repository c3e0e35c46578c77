//! API request/response types shared between services

use serde::{Deserialize, Serialize};

use crate::BirthProfile;

/// Report endpoint path served by mm-report
pub const REPORTS_PATH: &str = "/internal/v1/reports";

/// Analysis endpoint path served by mm-match
pub const ANALYSIS_PATH: &str = "/api/v1/analysis";

/// POST /api/v1/analysis request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "personA")]
    pub person_a: BirthProfile,
    #[serde(rename = "personB")]
    pub person_b: BirthProfile,
}

/// POST /api/v1/analysis response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub score: u32,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /ping response
#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            message: "pong".to_string(),
        }
    }
}
