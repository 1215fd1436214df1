//! Clinical analysis domain service.
//!
//! Forwards validated text to the analyzer and enriches the answer with the
//! Israeli context. Every analyzer failure surfaces as one fixed message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{AnalyzerRequest, ClinicalAnalysisCommand, ClinicalAnalyzer};
use crate::domain::{AnalyzeRequest, EnhancedAnalysis, Error};

/// Message returned for any analyzer failure.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";

/// Clinical analysis service implementing the driving port.
#[derive(Clone)]
pub struct ClinicalAnalysisService<A> {
    analyzer: Arc<A>,
}

impl<A> ClinicalAnalysisService<A> {
    /// Create a service backed by `analyzer`.
    pub fn new(analyzer: Arc<A>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl<A> ClinicalAnalysisCommand for ClinicalAnalysisService<A>
where
    A: ClinicalAnalyzer,
{
    async fn analyze(&self, request: AnalyzeRequest) -> Result<EnhancedAnalysis, Error> {
        let forwarded = AnalyzerRequest::from(&request);
        let analysis = self.analyzer.analyze(&forwarded).await.map_err(|err| {
            error!(error = %err, task = %forwarded.task, "clinical analysis failed");
            Error::internal(ANALYSIS_FAILED_MESSAGE)
        })?;
        Ok(EnhancedAnalysis::from_analysis(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ClinicalAnalyzerError, MockClinicalAnalyzer};
    use crate::domain::{AnalysisTask, ClinicalAnalysis, ErrorCode};
    use rstest::rstest;
    use serde_json::json;

    fn request(task: Option<&str>) -> AnalyzeRequest {
        AnalyzeRequest::try_from_parts(Some("מטופל בן 84 עם נפילות חוזרות"), task)
            .expect("valid request")
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_text_and_task_then_enriches() {
        let mut analyzer = MockClinicalAnalyzer::new();
        analyzer
            .expect_analyze()
            .withf(|req| req.task == AnalysisTask::Falls && req.clinical_text.contains("נפילות"))
            .times(1)
            .return_once(|_| {
                Ok(serde_json::from_value::<ClinicalAnalysis>(json!({
                    "task": "falls",
                    "riskAssessment": { "overall": { "category": "high", "score": 0.9 } },
                    "recommendations": ["Home safety evaluation"],
                }))
                .expect("analysis fixture"))
            });

        let service = ClinicalAnalysisService::new(Arc::new(analyzer));
        let enhanced = service
            .analyze(request(Some("falls")))
            .await
            .expect("analysis succeeds");

        assert_eq!(enhanced.israeli_context.guidelines.len(), 1);
        assert_eq!(enhanced.israeli_context.recommendations.len(), 3);
        assert_eq!(
            enhanced.israeli_context.recommendations[0],
            "Home safety evaluation"
        );
    }

    #[rstest]
    #[case::transport(ClinicalAnalyzerError::transport("connection refused"))]
    #[case::status(ClinicalAnalyzerError::status(502_u16, "bad gateway"))]
    #[case::decode(ClinicalAnalyzerError::decode("expected value"))]
    #[tokio::test]
    async fn analyzer_failures_become_fixed_internal_error(#[case] failure: ClinicalAnalyzerError) {
        let mut analyzer = MockClinicalAnalyzer::new();
        analyzer
            .expect_analyze()
            .times(1)
            .return_once(move |_| Err(failure));

        let service = ClinicalAnalysisService::new(Arc::new(analyzer));
        let err = service
            .analyze(request(None))
            .await
            .expect_err("analysis fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), ANALYSIS_FAILED_MESSAGE);
    }
}
