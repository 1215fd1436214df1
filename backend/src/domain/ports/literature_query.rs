//! Driving port for literature research.
//!
//! Inbound adapters pass raw, possibly missing, inputs. Validation and the
//! fixed per-operation failure messages live behind this port.

use async_trait::async_trait;

use crate::domain::{ArticleId, Error, LiteratureAnalysis, MedicalArticle, UiLanguage};

/// Dashboard literature search input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiteratureSearch {
    /// Free-text query. Derived from `clinical_case` when absent.
    pub query: Option<String>,
    /// Clinical case used for narration.
    pub clinical_case: Option<String>,
    /// Resident's working language.
    pub language: UiLanguage,
}

/// Articles found for a search plus the optional narration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiteratureSearchResult {
    pub articles: Vec<MedicalArticle>,
    /// `None` when no case was given, nothing was found, narration is
    /// disabled, or the narrator failed.
    pub analysis: Option<LiteratureAnalysis>,
}

/// Articles found for one symptom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymptomResearch {
    /// Symptom exactly as supplied by the caller.
    pub symptom: String,
    pub articles: Vec<MedicalArticle>,
}

/// Domain use-case port for literature research.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiteratureQuery: Send + Sync {
    /// Search the library and narrate the results against the case.
    async fn search(&self, search: LiteratureSearch) -> Result<LiteratureSearchResult, Error>;

    /// Research one symptom, translating known Hebrew terms.
    async fn research_symptom(
        &self,
        symptom: Option<String>,
        language: UiLanguage,
    ) -> Result<SymptomResearch, Error>;

    /// Fetch a single article.
    async fn article(&self, id: &ArticleId) -> Result<MedicalArticle, Error>;

    /// List Israeli geriatrics guidelines.
    async fn guidelines(&self) -> Result<Vec<MedicalArticle>, Error>;
}

/// Fixture query backed by an empty library.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLiteratureQuery;

#[async_trait]
impl LiteratureQuery for FixtureLiteratureQuery {
    async fn search(&self, _search: LiteratureSearch) -> Result<LiteratureSearchResult, Error> {
        Ok(LiteratureSearchResult::default())
    }

    async fn research_symptom(
        &self,
        symptom: Option<String>,
        _language: UiLanguage,
    ) -> Result<SymptomResearch, Error> {
        let symptom = symptom
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::invalid_request("Symptom parameter required"))?;
        Ok(SymptomResearch {
            symptom,
            articles: Vec::new(),
        })
    }

    async fn article(&self, _id: &ArticleId) -> Result<MedicalArticle, Error> {
        Err(Error::not_found("Article not found"))
    }

    async fn guidelines(&self) -> Result<Vec<MedicalArticle>, Error> {
        Ok(Vec::new())
    }
}
