//! Medical literature handlers backed by the SZMC e-library.
//!
//! ```text
//! POST /api/medical-research {"clinicalCase":"...","language":"he"}
//! GET  /api/medical-research?symptom=נפילות&language=he
//! GET  /api/medical-research/articles/{id}
//! GET  /api/medical-research/guidelines
//! ```
//!
//! Successful responses carry `"success": true`; failures use the shared
//! error envelope.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::LiteratureSearch;
use crate::domain::{ArticleId, LiteratureAnalysis, MedicalArticle, UiLanguage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ArticleResponseSchema, ErrorSchema, GuidelinesResponseSchema, LiteratureSearchResponseSchema,
    SymptomResearchResponseSchema,
};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/medical-research`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiteratureSearchRequest {
    /// Free-text query. Derived from `clinicalCase` when omitted.
    #[schema(example = "falls prevention")]
    pub query: Option<String>,
    /// Clinical case to narrate the results against.
    pub clinical_case: Option<String>,
    /// `he` (default) or any other code for English.
    #[schema(example = "he")]
    pub language: Option<String>,
}

/// Query string for `GET /api/medical-research`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SymptomQuery {
    /// Symptom to research. Known Hebrew terms are translated for English
    /// readers.
    pub symptom: Option<String>,
    /// `he` (default) or any other code for English.
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteratureSearchResponse {
    success: bool,
    articles: Vec<MedicalArticle>,
    analysis: Option<LiteratureAnalysis>,
    total_results: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomResearchResponse {
    success: bool,
    articles: Vec<MedicalArticle>,
    symptom: String,
    total_results: usize,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    success: bool,
    article: MedicalArticle,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelinesResponse {
    success: bool,
    articles: Vec<MedicalArticle>,
    total_results: usize,
}

/// Empty codes are treated as absent so `?language=` keeps the Hebrew default.
fn ui_language(code: Option<&str>) -> UiLanguage {
    UiLanguage::from_code(code.filter(|value| !value.is_empty()))
}

/// Search the library and narrate the results against a clinical case.
#[utoipa::path(
    post,
    path = "/api/medical-research",
    request_body = LiteratureSearchRequest,
    responses(
        (status = 200, description = "Matching articles and optional narration", body = LiteratureSearchResponseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Library search failed", body = ErrorSchema)
    ),
    tags = ["literature"],
    operation_id = "searchLiterature"
)]
#[post("/api/medical-research")]
pub async fn search_literature(
    state: web::Data<HttpState>,
    payload: web::Json<LiteratureSearchRequest>,
) -> ApiResult<web::Json<LiteratureSearchResponse>> {
    let LiteratureSearchRequest {
        query,
        clinical_case,
        language,
    } = payload.into_inner();
    let result = state
        .literature
        .search(LiteratureSearch {
            query,
            clinical_case,
            language: ui_language(language.as_deref()),
        })
        .await?;
    Ok(web::Json(LiteratureSearchResponse {
        success: true,
        total_results: result.articles.len(),
        articles: result.articles,
        analysis: result.analysis,
    }))
}

/// Research literature for a single symptom.
#[utoipa::path(
    get,
    path = "/api/medical-research",
    params(SymptomQuery),
    responses(
        (status = 200, description = "Articles about the symptom", body = SymptomResearchResponseSchema),
        (status = 400, description = "Symptom parameter missing", body = ErrorSchema),
        (status = 500, description = "Library search failed", body = ErrorSchema)
    ),
    tags = ["literature"],
    operation_id = "researchSymptom"
)]
#[get("/api/medical-research")]
pub async fn research_symptom(
    state: web::Data<HttpState>,
    query: web::Query<SymptomQuery>,
) -> ApiResult<web::Json<SymptomResearchResponse>> {
    let SymptomQuery { symptom, language } = query.into_inner();
    let language = ui_language(language.as_deref());
    let research = state.literature.research_symptom(symptom, language).await?;
    Ok(web::Json(SymptomResearchResponse {
        success: true,
        total_results: research.articles.len(),
        articles: research.articles,
        symptom: research.symptom,
    }))
}

/// Fetch a single article by library identifier.
#[utoipa::path(
    get,
    path = "/api/medical-research/articles/{id}",
    params(("id" = String, Path, description = "Library article identifier")),
    responses(
        (status = 200, description = "Article", body = ArticleResponseSchema),
        (status = 404, description = "Article not found", body = ErrorSchema),
        (status = 500, description = "Library lookup failed", body = ErrorSchema)
    ),
    tags = ["literature"],
    operation_id = "getArticle"
)]
#[get("/api/medical-research/articles/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = ArticleId::new(path.into_inner());
    let article = state.literature.article(&id).await?;
    Ok(web::Json(ArticleResponse {
        success: true,
        article,
    }))
}

/// List Israeli geriatrics guidelines.
#[utoipa::path(
    get,
    path = "/api/medical-research/guidelines",
    responses(
        (status = 200, description = "Guideline articles", body = GuidelinesResponseSchema),
        (status = 500, description = "Library search failed", body = ErrorSchema)
    ),
    tags = ["literature"],
    operation_id = "listGuidelines"
)]
#[get("/api/medical-research/guidelines")]
pub async fn list_guidelines(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<GuidelinesResponse>> {
    let articles = state.literature.guidelines().await?;
    Ok(web::Json(GuidelinesResponse {
        success: true,
        total_results: articles.len(),
        articles,
    }))
}

#[cfg(test)]
#[path = "medical_research_tests.rs"]
mod tests;
