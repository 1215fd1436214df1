//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`ClinicalAnalyzer`, `MedicalLibrary`, `LiteratureNarrator`)
//! are implemented by outbound adapters. Driving ports
//! (`ClinicalAnalysisCommand`, `LiteratureQuery`) are what HTTP handlers call.

mod macros;
pub(crate) use macros::{define_port_error, impl_upstream_error};

mod clinical_analysis_command;
mod clinical_analyzer;
mod literature_narrator;
mod literature_query;
mod medical_library;

/// Failure categories shared by every HTTP-backed driven port.
///
/// Outbound adapters build port errors through this trait when the mapping
/// does not depend on which upstream failed.
pub trait UpstreamError: Sized {
    /// The request never produced a response.
    fn transport_failure(message: String) -> Self;
    /// The upstream did not answer within the outbound timeout.
    fn timeout_failure(message: String) -> Self;
    /// The upstream answered with a non-success status.
    fn status_failure(status: u16, message: String) -> Self;
    /// The response body could not be decoded.
    fn decode_failure(message: String) -> Self;
}

#[cfg(test)]
pub use clinical_analysis_command::MockClinicalAnalysisCommand;
pub use clinical_analysis_command::{ClinicalAnalysisCommand, FixtureClinicalAnalysisCommand};
#[cfg(test)]
pub use clinical_analyzer::MockClinicalAnalyzer;
pub use clinical_analyzer::{AnalyzerRequest, ClinicalAnalyzer, ClinicalAnalyzerError, FixtureClinicalAnalyzer};
#[cfg(test)]
pub use literature_narrator::MockLiteratureNarrator;
pub use literature_narrator::{FixtureLiteratureNarrator, LiteratureNarrator, LiteratureNarratorError};
#[cfg(test)]
pub use literature_query::MockLiteratureQuery;
pub use literature_query::{
    FixtureLiteratureQuery, LiteratureQuery, LiteratureSearch, LiteratureSearchResult,
    SymptomResearch,
};
#[cfg(test)]
pub use medical_library::MockMedicalLibrary;
pub use medical_library::{FixtureMedicalLibrary, MedicalLibrary, MedicalLibraryError};
