//! Clinical analysis handler.
//!
//! ```text
//! POST /api/analyze {"clinical_text":"Patient, 82, two falls this month","task":"falls"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{AnalyzeRequest, EnhancedAnalysis};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EnhancedAnalysisSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::analyze_validation_error;

/// Wire spelling of an explicit `"task": null`, echoed in the rejection.
const NULL_TASK: &str = "null";

/// Request body for `POST /api/analyze`.
///
/// Both fields are optional on the wire so that a missing `clinical_text`
/// reaches domain validation instead of failing deserialisation. `task`
/// keeps an explicit `null` apart from an absent field: only absence selects
/// the default task.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AnalyzeRequestBody {
    /// Free clinical narrative, at least five characters.
    #[schema(example = "מטופלת בת 84, שתי נפילות בחודש האחרון, MMSE 22")]
    pub clinical_text: Option<String>,
    /// One of `comprehensive`, `medication`, `cognitive`, `falls`,
    /// `nutrition`. Defaults to `comprehensive` when omitted.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "falls")]
    pub task: Option<Option<String>>,
}

impl AnalyzeRequestBody {
    /// Task as handed to validation; an explicit `null` is an unknown value.
    fn task(&self) -> Option<&str> {
        self.task
            .as_ref()
            .map(|task| task.as_deref().unwrap_or(NULL_TASK))
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Analyse clinical text and append the Israeli context.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequestBody,
    responses(
        (status = 200, description = "Analyzer output enriched with the Israeli context", body = EnhancedAnalysisSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Analyzer unavailable or returned an error", body = ErrorSchema)
    ),
    tags = ["analysis"],
    operation_id = "analyzeClinicalText"
)]
#[post("/api/analyze")]
pub async fn analyze(
    state: web::Data<HttpState>,
    payload: web::Json<AnalyzeRequestBody>,
) -> ApiResult<web::Json<EnhancedAnalysis>> {
    let body = payload.into_inner();
    let request = AnalyzeRequest::try_from_parts(body.clinical_text.as_deref(), body.task())
        .map_err(analyze_validation_error)?;
    let enhanced = state.analysis.analyze(request).await?;
    Ok(web::Json(enhanced))
}
