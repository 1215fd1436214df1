//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation.
//! The wrappers mirror the JSON the portal emits but live in the inbound
//! adapter layer where framework concerns belong.
//!
//! Analyzer sub-documents (`patientData`, `scores`, ...) are described as
//! free-form objects: the analyzer owns their shape.

use serde_json::Value;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An upstream collaborator failed or an unexpected error occurred.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`] as sent on the wire.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Human-readable message.
    #[schema(example = "Clinical text must be at least 5 characters")]
    error: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<Value>,
}

/// OpenAPI schema for [`crate::domain::IsraeliContext`].
#[derive(ToSchema)]
#[schema(as = IsraeliContext)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IsraeliContextSchema {
    /// Israeli guideline lines triggered by the analysis.
    guidelines: Vec<String>,
    /// Analyzer recommendations followed by the local standard lines.
    recommendations: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::EnhancedAnalysis`].
///
/// Any additional analyzer field is passed through unchanged.
#[derive(ToSchema)]
#[schema(as = EnhancedAnalysis, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnhancedAnalysisSchema {
    #[schema(example = "comprehensive")]
    task: Option<String>,
    fallback: Option<bool>,
    patient_data: Option<Value>,
    scores: Option<Value>,
    risk_assessment: Option<Value>,
    clinical_alerts: Option<Vec<Value>>,
    recommendations: Option<Vec<String>>,
    israeli_context: IsraeliContextSchema,
}

/// OpenAPI schema for [`crate::domain::MedicalArticle`].
#[derive(ToSchema)]
#[schema(as = MedicalArticle, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MedicalArticleSchema {
    #[schema(example = "szmc-4711")]
    id: String,
    title: String,
    title_he: Option<String>,
    authors: Vec<String>,
    journal: String,
    published_date: String,
    pmid: Option<String>,
    doi: Option<String>,
    #[schema(rename = "abstract")]
    abstract_text: String,
    abstract_he: Option<String>,
    full_text_url: Option<String>,
    pdf_url: Option<String>,
    keywords: Vec<String>,
    specialty: Vec<String>,
    relevance_score: Option<f64>,
}

/// OpenAPI schema for [`crate::domain::RelevantArticle`].
#[derive(ToSchema)]
#[schema(as = RelevantArticle, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RelevantArticleSchema {
    id: String,
    title: String,
    #[schema(example = 0.8)]
    relevance_score: f64,
}

/// OpenAPI schema for [`crate::domain::LiteratureAnalysis`].
#[derive(ToSchema)]
#[schema(as = LiteratureAnalysis, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LiteratureAnalysisSchema {
    analysis: String,
    relevant_articles: Vec<RelevantArticleSchema>,
}

/// Response of `POST /api/medical-research`.
#[derive(ToSchema)]
#[schema(as = LiteratureSearchResponse, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LiteratureSearchResponseSchema {
    success: bool,
    articles: Vec<MedicalArticleSchema>,
    /// `null` unless a clinical case was given, articles were found and
    /// narration succeeded.
    analysis: Option<LiteratureAnalysisSchema>,
    total_results: usize,
}

/// Response of `GET /api/medical-research`.
#[derive(ToSchema)]
#[schema(as = SymptomResearchResponse, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SymptomResearchResponseSchema {
    success: bool,
    articles: Vec<MedicalArticleSchema>,
    #[schema(example = "נפילות")]
    symptom: String,
    total_results: usize,
}

/// Response of `GET /api/medical-research/articles/{id}`.
#[derive(ToSchema)]
#[schema(as = ArticleResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ArticleResponseSchema {
    success: bool,
    article: MedicalArticleSchema,
}

/// Response of `GET /api/medical-research/guidelines`.
#[derive(ToSchema)]
#[schema(as = GuidelinesResponse, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GuidelinesResponseSchema {
    success: bool,
    articles: Vec<MedicalArticleSchema>,
    total_results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_matches_wire_envelope() {
        assert_eq!(ErrorSchema::name(), "Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        for field in ["success", "error", "code", "traceId", "details"] {
            assert!(schema_json.contains(field), "missing field {field}");
        }
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "not_found", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn article_schema_uses_camel_case_and_abstract() {
        let schema_json = schema_to_json::<MedicalArticleSchema>();
        assert!(schema_json.contains("publishedDate"));
        assert!(schema_json.contains("\"abstract\""));
        assert!(!schema_json.contains("abstract_text"));
    }

    #[test]
    fn search_response_schema_has_total_results() {
        assert!(schema_to_json::<LiteratureSearchResponseSchema>().contains("totalResults"));
    }
}
