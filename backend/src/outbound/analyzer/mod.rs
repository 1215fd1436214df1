//! Clinical analyzer adapter.

mod dto;
mod http_analyzer;

pub use http_analyzer::HttpClinicalAnalyzer;
