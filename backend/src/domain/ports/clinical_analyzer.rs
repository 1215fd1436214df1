//! Driven port for the external clinical NLP analyzer.
//!
//! The analyzer owns entity extraction, scoring and risk stratification. The
//! portal forwards validated text and receives a [`ClinicalAnalysis`].

use async_trait::async_trait;
use serde_json::Value;

use super::{define_port_error, impl_upstream_error};
use crate::domain::{AnalysisTask, AnalyzeRequest, ClinicalAnalysis};

/// Payload forwarded to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerRequest {
    /// Clinical narrative, at least five characters long.
    pub clinical_text: String,
    /// Requested analysis flavour.
    pub task: AnalysisTask,
}

impl From<&AnalyzeRequest> for AnalyzerRequest {
    fn from(request: &AnalyzeRequest) -> Self {
        Self {
            clinical_text: request.clinical_text().to_owned(),
            task: request.task(),
        }
    }
}

define_port_error! {
    /// Errors surfaced while calling the analyzer.
    pub enum ClinicalAnalyzerError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "analyzer transport failed: {message}",
        /// The analyzer did not answer within the outbound timeout.
        Timeout { message: String } =>
            "analyzer timeout: {message}",
        /// The analyzer answered with a non-success status.
        Status { status: u16, message: String } =>
            "analyzer returned status {status}: {message}",
        /// The analyzer response body could not be decoded.
        Decode { message: String } =>
            "analyzer response decode failed: {message}",
    }
}

impl_upstream_error!(ClinicalAnalyzerError);

/// Port for running one clinical analysis.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClinicalAnalyzer: Send + Sync {
    /// Analyse clinical text.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use geriatrics_portal::domain::AnalysisTask;
    /// use geriatrics_portal::domain::ports::{
    ///     AnalyzerRequest, ClinicalAnalyzer, FixtureClinicalAnalyzer,
    /// };
    ///
    /// let analysis = FixtureClinicalAnalyzer
    ///     .analyze(&AnalyzerRequest {
    ///         clinical_text: "82 year old with falls".to_owned(),
    ///         task: AnalysisTask::Falls,
    ///     })
    ///     .await?;
    /// assert_eq!(analysis.task(), Some("falls"));
    /// # Ok::<(), geriatrics_portal::domain::ports::ClinicalAnalyzerError>(())
    /// ```
    async fn analyze(
        &self,
        request: &AnalyzerRequest,
    ) -> Result<ClinicalAnalysis, ClinicalAnalyzerError>;
}

/// Fixture analyzer echoing the task with no findings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureClinicalAnalyzer;

#[async_trait]
impl ClinicalAnalyzer for FixtureClinicalAnalyzer {
    async fn analyze(
        &self,
        request: &AnalyzerRequest,
    ) -> Result<ClinicalAnalysis, ClinicalAnalyzerError> {
        let mut analysis = ClinicalAnalysis::default();
        analysis.insert("task", Value::from(request.task.as_str()));
        analysis.insert("recommendations", Value::Array(Vec::new()));
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn request_copies_validated_fields() {
        let request = AnalyzeRequest::try_from_parts(Some("confused after fall"), Some("cognitive"))
            .expect("valid request");
        let forwarded = AnalyzerRequest::from(&request);
        assert_eq!(forwarded.clinical_text, "confused after fall");
        assert_eq!(forwarded.task, AnalysisTask::Cognitive);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_task() {
        let analysis = FixtureClinicalAnalyzer
            .analyze(&AnalyzerRequest {
                clinical_text: "weight loss".to_owned(),
                task: AnalysisTask::Nutrition,
            })
            .await
            .expect("fixture analysis");
        assert_eq!(analysis.task(), Some("nutrition"));
    }
}
