//! Literature research domain service.
//!
//! Implements [`LiteratureQuery`] over the library and the optional narrator.
//! Library failures surface as fixed per-operation messages; narrator
//! failures only drop the narration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::domain::literature::{case_search, extract_key_terms, guidelines_search, symptom_search};
use crate::domain::narration::{NarrationRequest, literature_analysis};
use crate::domain::ports::{
    LiteratureNarrator, LiteratureQuery, LiteratureSearch, LiteratureSearchResult, MedicalLibrary,
    MedicalLibraryError, SymptomResearch,
};
use crate::domain::{ArticleId, Error, LiteratureAnalysis, MedicalArticle, UiLanguage};

/// Message for a failed dashboard search.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search medical literature";
/// Message for a failed symptom lookup.
pub const SYMPTOM_FAILED_MESSAGE: &str = "Failed to research symptom";
/// Message for a failed article fetch.
pub const ARTICLE_FAILED_MESSAGE: &str = "Failed to fetch article";
/// Message for a failed guideline listing.
pub const GUIDELINES_FAILED_MESSAGE: &str = "Failed to fetch guidelines";
/// Message when a symptom query omits the symptom.
pub const SYMPTOM_REQUIRED_MESSAGE: &str = "Symptom parameter required";
/// Message when the library has no such article.
pub const ARTICLE_NOT_FOUND_MESSAGE: &str = "Article not found";

/// Literature service implementing the driving port.
///
/// `narrator` is `None` when no LLM credential is configured.
#[derive(Clone)]
pub struct LiteratureService<L, N> {
    library: Arc<L>,
    narrator: Option<Arc<N>>,
}

impl<L, N> LiteratureService<L, N> {
    /// Create a service backed by `library` and an optional narrator.
    pub fn new(library: Arc<L>, narrator: Option<Arc<N>>) -> Self {
        Self { library, narrator }
    }
}

impl<L, N> LiteratureService<L, N>
where
    L: MedicalLibrary,
    N: LiteratureNarrator,
{
    fn library_failure(
        operation: &'static str,
        message: &'static str,
    ) -> impl FnOnce(MedicalLibraryError) -> Error {
        move |err| {
            error!(error = %err, operation, "medical library call failed");
            Error::internal(message)
        }
    }

    async fn narrate(
        &self,
        clinical_case: &str,
        articles: &[MedicalArticle],
        language: UiLanguage,
    ) -> Option<LiteratureAnalysis> {
        let Some(narrator) = self.narrator.as_ref() else {
            debug!("literature narration disabled");
            return None;
        };
        let request = NarrationRequest::for_case(clinical_case, articles, language);
        match narrator.narrate(&request).await {
            Ok(text) => Some(literature_analysis(text, articles)),
            Err(err) => {
                warn!(error = %err, "literature narration failed");
                None
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

#[async_trait]
impl<L, N> LiteratureQuery for LiteratureService<L, N>
where
    L: MedicalLibrary,
    N: LiteratureNarrator,
{
    async fn search(&self, search: LiteratureSearch) -> Result<LiteratureSearchResult, Error> {
        let LiteratureSearch {
            query,
            clinical_case,
            language,
        } = search;
        let clinical_case = non_empty(clinical_case);
        let query = non_empty(query)
            .or_else(|| clinical_case.as_deref().map(extract_key_terms))
            .unwrap_or_default();

        let params = case_search(query, language);
        params
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let articles = self
            .library
            .search(&params)
            .await
            .map_err(Self::library_failure("search", SEARCH_FAILED_MESSAGE))?;

        let analysis = match clinical_case.as_deref() {
            Some(case) if !articles.is_empty() => self.narrate(case, &articles, language).await,
            _ => None,
        };

        Ok(LiteratureSearchResult { articles, analysis })
    }

    async fn research_symptom(
        &self,
        symptom: Option<String>,
        language: UiLanguage,
    ) -> Result<SymptomResearch, Error> {
        let symptom =
            non_empty(symptom).ok_or_else(|| Error::invalid_request(SYMPTOM_REQUIRED_MESSAGE))?;
        let params = symptom_search(&symptom, language);
        let articles = self
            .library
            .search(&params)
            .await
            .map_err(Self::library_failure("research_symptom", SYMPTOM_FAILED_MESSAGE))?;
        Ok(SymptomResearch { symptom, articles })
    }

    async fn article(&self, id: &ArticleId) -> Result<MedicalArticle, Error> {
        self.library
            .article(id)
            .await
            .map_err(Self::library_failure("article", ARTICLE_FAILED_MESSAGE))?
            .ok_or_else(|| Error::not_found(ARTICLE_NOT_FOUND_MESSAGE))
    }

    async fn guidelines(&self) -> Result<Vec<MedicalArticle>, Error> {
        self.library
            .search(&guidelines_search())
            .await
            .map_err(Self::library_failure("guidelines", GUIDELINES_FAILED_MESSAGE))
    }
}

#[cfg(test)]
#[path = "literature_service_tests.rs"]
mod tests;
