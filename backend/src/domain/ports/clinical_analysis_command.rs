//! Driving port for the clinical analysis use-case.
//!
//! HTTP handlers call this port with an already validated request and get
//! back the analyzer output enriched with the Israeli context.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AnalyzeRequest, ClinicalAnalysis, EnhancedAnalysis, Error};

/// Domain use-case port for analysing clinical text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClinicalAnalysisCommand: Send + Sync {
    /// Run the analysis and append the Israeli context.
    async fn analyze(&self, request: AnalyzeRequest) -> Result<EnhancedAnalysis, Error>;
}

/// Fixture command returning an empty enriched analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClinicalAnalysisCommand;

#[async_trait]
impl ClinicalAnalysisCommand for FixtureClinicalAnalysisCommand {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<EnhancedAnalysis, Error> {
        let mut analysis = ClinicalAnalysis::default();
        analysis.insert("task", Value::from(request.task().as_str()));
        Ok(EnhancedAnalysis::from_analysis(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_adds_standard_recommendations() {
        let request =
            AnalyzeRequest::try_from_parts(Some("falls at home"), None).expect("valid request");
        let enhanced = FixtureClinicalAnalysisCommand
            .analyze(request)
            .await
            .expect("fixture analysis");
        assert_eq!(enhanced.analysis.task(), Some("comprehensive"));
        assert!(enhanced.israeli_context.guidelines.is_empty());
        assert_eq!(enhanced.israeli_context.recommendations.len(), 2);
    }
}
