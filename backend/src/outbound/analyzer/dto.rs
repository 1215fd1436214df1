//! Wire DTOs for the analyzer service.
//!
//! The analyzer speaks snake_case on the way in. Its response is any JSON
//! object and decodes straight into the domain `ClinicalAnalysis`.

use serde::Serialize;

use crate::domain::ports::AnalyzerRequest;

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeRequestDto<'a> {
    pub(super) clinical_text: &'a str,
    pub(super) task: &'static str,
}

impl<'a> From<&'a AnalyzerRequest> for AnalyzeRequestDto<'a> {
    fn from(request: &'a AnalyzerRequest) -> Self {
        Self {
            clinical_text: request.clinical_text.as_str(),
            task: request.task.as_str(),
        }
    }
}
