//! Domain primitives, services and ports.
//!
//! Purpose: describe the clinical analysis and literature research use-cases
//! without any HTTP or transport detail. Outbound adapters implement the
//! driven ports; inbound adapters call the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - TraceId: request-scoped correlation identifier.
//! - Analysis types and Israeli-context enrichment (`analysis`).
//! - Literature types and search rules (`literature`, `narration`).
//! - Services implementing the driving ports.

pub mod analysis;
pub mod clinical_analysis_service;
pub mod error;
pub mod literature;
pub mod literature_service;
pub mod narration;
pub mod ports;
pub mod trace_id;

pub use self::analysis::{
    AnalysisTask, AnalyzeRequest, AnalyzeRequestValidationError, ClinicalAnalysis,
    EnhancedAnalysis, IsraeliContext, enhance_with_israeli_standards, israeli_guidelines,
};
pub use self::clinical_analysis_service::ClinicalAnalysisService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::literature::{
    ArticleId, LibrarySearchParams, LibrarySearchValidationError, LiteratureAnalysis,
    MedicalArticle, RelevantArticle, SearchLanguage, Specialty, UiLanguage, extract_key_terms,
    search_language_for, translate_symptom,
};
pub use self::literature_service::LiteratureService;
pub use self::narration::NarrationRequest;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

