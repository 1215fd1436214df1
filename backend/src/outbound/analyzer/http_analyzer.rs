//! Reqwest-backed analyzer adapter.
//!
//! Owns transport details only: request serialisation, timeout and status
//! mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::dto::AnalyzeRequestDto;
use crate::domain::ClinicalAnalysis;
use crate::domain::ports::{AnalyzerRequest, ClinicalAnalyzer, ClinicalAnalyzerError};
use crate::outbound::http_support::{HttpAdapterBuildError, join_path, status_error, transport_error};

/// Analyzer adapter posting to `{base}/api/analyze`.
pub struct HttpClinicalAnalyzer {
    client: Client,
    endpoint: Url,
}

impl HttpClinicalAnalyzer {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot carry a path.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, HttpAdapterBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = join_path(base_url, &["api", "analyze"])?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ClinicalAnalyzer for HttpClinicalAnalyzer {
    async fn analyze(
        &self,
        request: &AnalyzerRequest,
    ) -> Result<ClinicalAnalysis, ClinicalAnalyzerError> {
        debug!(task = %request.task, endpoint = %self.endpoint, "calling clinical analyzer");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AnalyzeRequestDto::from(request))
            .send()
            .await
            .map_err(transport_error::<ClinicalAnalyzerError>)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error::<ClinicalAnalyzerError>)?;
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            ClinicalAnalyzerError::decode(format!("invalid analyzer JSON payload: {error}"))
        })
    }
}
