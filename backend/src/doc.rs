//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every JSON endpoint of the portal plus the health
//! probes, and the schema wrappers from [`crate::inbound::http::schemas`].
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use crate::inbound::http::analyze::AnalyzeRequestBody;
use crate::inbound::http::medical_research::LiteratureSearchRequest;
use crate::inbound::http::schemas::{
    ArticleResponseSchema, EnhancedAnalysisSchema, ErrorCodeSchema, ErrorSchema,
    GuidelinesResponseSchema, IsraeliContextSchema, LiteratureAnalysisSchema,
    LiteratureSearchResponseSchema, MedicalArticleSchema, RelevantArticleSchema,
    SymptomResearchResponseSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the portal API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geriatrics residency portal API",
        description = "Clinical analysis and SZMC literature research for geriatrics residents."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::analyze::analyze,
        crate::inbound::http::medical_research::search_literature,
        crate::inbound::http::medical_research::research_symptom,
        crate::inbound::http::medical_research::get_article,
        crate::inbound::http::medical_research::list_guidelines,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AnalyzeRequestBody,
        LiteratureSearchRequest,
        ErrorSchema,
        ErrorCodeSchema,
        IsraeliContextSchema,
        EnhancedAnalysisSchema,
        MedicalArticleSchema,
        RelevantArticleSchema,
        LiteratureAnalysisSchema,
        LiteratureSearchResponseSchema,
        SymptomResearchResponseSchema,
        ArticleResponseSchema,
        GuidelinesResponseSchema,
    )),
    tags(
        (name = "analysis", description = "Clinical text analysis"),
        (name = "literature", description = "Medical literature research"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
