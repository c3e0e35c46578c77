//! Origin report client
//!
//! Calls the external computation engine when both cache tiers miss. One
//! attempt per call: any transport failure or non-2xx status is returned to
//! the caller as-is.

use std::time::Duration;
use thiserror::Error;

use mm_common::{BirthProfile, ReportPayload};

const USER_AGENT: &str = concat!("mm-report/", env!("CARGO_PKG_VERSION"));

/// Origin engine errors
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status with the response body for diagnostics
    #[error("Engine status {status}: {body}")]
    Status { status: u16, body: String },
}

/// HTTP client for the report computation engine
#[derive(Clone)]
pub struct OriginClient {
    http_client: reqwest::Client,
    engine_url: String,
    api_key: Option<String>,
}

impl OriginClient {
    pub fn new(
        engine_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, OriginError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| OriginError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            engine_url: engine_url.into(),
            // Blank keys behave like no key
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn engine_url(&self) -> &str {
        &self.engine_url
    }

    /// Compute the report for one profile
    pub async fn fetch(&self, profile: &BirthProfile) -> Result<ReportPayload, OriginError> {
        let mut request = self
            .http_client
            .post(&self.engine_url)
            .json(profile);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        tracing::debug!(engine_url = %self.engine_url, "Requesting report from engine");

        let response = request
            .send()
            .await
            .map_err(|e| OriginError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OriginError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| OriginError::Network(e.to_string()))
    }
}
