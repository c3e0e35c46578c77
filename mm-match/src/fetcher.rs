//! Report service client
//!
//! The orchestrator reaches reports only through [`ReportFetcher`], so the
//! cross-service call can be replaced in tests.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use mm_common::api::REPORTS_PATH;
use mm_common::{BirthProfile, ReportPayload};

const USER_AGENT: &str = concat!("mm-match/", env!("CARGO_PKG_VERSION"));

/// Report fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Report service status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Source of one profile's report
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch(&self, profile: &BirthProfile) -> Result<ReportPayload, FetchError>;
}

/// Fetches reports from mm-report over HTTP
pub struct HttpReportFetcher {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpReportFetcher {
    /// `report_service_url` is the service base, e.g. `http://localhost:8085`
    pub fn new(report_service_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}{}", report_service_url.trim_end_matches('/'), REPORTS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReportFetcher for HttpReportFetcher {
    async fn fetch(&self, profile: &BirthProfile) -> Result<ReportPayload, FetchError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(profile)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
