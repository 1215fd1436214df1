//! Medical literature shapes and search-parameter rules.
//!
//! The SZMC e-library performs the search and ranking. The portal decides what
//! to ask for: validated search parameters, Hebrew symptom translation and the
//! preset guideline query.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum number of characters in a free-text literature query.
pub const MIN_QUERY_CHARS: usize = 2;
/// Largest page the library accepts.
pub const MAX_SEARCH_LIMIT: u32 = 100;
/// Page size used when a caller leaves `limit` unset.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// Page size for the dashboard literature search.
pub const CASE_SEARCH_LIMIT: u32 = 10;
/// Page size for symptom research.
pub const SYMPTOM_SEARCH_LIMIT: u32 = 15;
/// Page size for the guideline listing.
pub const GUIDELINES_SEARCH_LIMIT: u32 = 50;

const GUIDELINES_QUERY: &str = "geriatrics guidelines Israel ministry health";
const FALLBACK_KEY_TERMS: &str = "geriatrics elderly";
const MAX_KEY_TERMS: usize = 3;

const HEBREW_SYMPTOM_TERMS: [(&str, &str); 6] = [
    ("נפילות", "falls elderly"),
    ("בלבול", "confusion delirium"),
    ("דמנציה", "dementia alzheimer"),
    ("דכאון", "depression elderly"),
    ("חולשה", "weakness frailty"),
    ("סחרחורת", "dizziness vertigo elderly"),
];

static KEY_TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?i)נפילות|בלבול|דמנציה|דכאון|חולשה|falls|confusion|dementia|depression")
        .unwrap_or_else(|err| panic!("key term pattern must compile: {err}"))
});

/// Medical specialty filter understood by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specialty {
    #[default]
    Geriatrics,
    InternalMedicine,
    Cardiology,
    Neurology,
}

impl Specialty {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Geriatrics => "geriatrics",
            Self::InternalMedicine => "internal-medicine",
            Self::Cardiology => "cardiology",
            Self::Neurology => "neurology",
        }
    }
}

/// Article languages the library should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchLanguage {
    He,
    En,
    #[default]
    Both,
}

impl SearchLanguage {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::He => "he",
            Self::En => "en",
            Self::Both => "both",
        }
    }
}

/// Language the resident is working in.
///
/// Anything other than `he` is treated as English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiLanguage {
    #[default]
    Hebrew,
    English,
}

impl UiLanguage {
    /// Parse a client-supplied language code, defaulting to Hebrew when absent.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::domain::UiLanguage;
    ///
    /// assert_eq!(UiLanguage::from_code(None), UiLanguage::Hebrew);
    /// assert_eq!(UiLanguage::from_code(Some("he")), UiLanguage::Hebrew);
    /// assert_eq!(UiLanguage::from_code(Some("fr")), UiLanguage::English);
    /// ```
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            None | Some("he") => Self::Hebrew,
            Some(_) => Self::English,
        }
    }
}

/// Library language for a UI language: Hebrew readers get results in both
/// languages, everyone else in English.
pub fn search_language_for(language: UiLanguage) -> SearchLanguage {
    match language {
        UiLanguage::Hebrew => SearchLanguage::Both,
        UiLanguage::English => SearchLanguage::En,
    }
}

/// Validation errors for [`LibrarySearchParams`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibrarySearchValidationError {
    /// Query shorter than [`MIN_QUERY_CHARS`].
    #[error("Search query must be at least 2 characters")]
    QueryTooShort,
    /// Limit outside `1..=100`.
    #[error("Limit must be between 1 and 100")]
    LimitOutOfRange {
        /// Rejected value.
        limit: u32,
    },
}

/// Parameters for one library search.
///
/// Optional fields fall back to the library defaults (geriatrics, both
/// languages, twenty results).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySearchParams {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Specialty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<SearchLanguage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl LibrarySearchParams {
    /// Start a search for `query` with every option unset.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restrict to one specialty.
    #[must_use]
    pub fn specialty(mut self, specialty: Specialty) -> Self {
        self.specialty = Some(specialty);
        self
    }

    /// Restrict article languages.
    #[must_use]
    pub fn language(mut self, language: SearchLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Cap the number of results.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the query length and limit range. Only the first failure is
    /// reported.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::domain::{LibrarySearchParams, LibrarySearchValidationError};
    ///
    /// assert!(LibrarySearchParams::new("delirium").limit(10).validate().is_ok());
    /// assert_eq!(
    ///     LibrarySearchParams::new("d").validate(),
    ///     Err(LibrarySearchValidationError::QueryTooShort)
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), LibrarySearchValidationError> {
        if self.query.chars().count() < MIN_QUERY_CHARS {
            return Err(LibrarySearchValidationError::QueryTooShort);
        }
        match self.limit {
            Some(limit) if !(1..=MAX_SEARCH_LIMIT).contains(&limit) => {
                Err(LibrarySearchValidationError::LimitOutOfRange { limit })
            }
            _ => Ok(()),
        }
    }

    /// Specialty sent to the library.
    pub fn effective_specialty(&self) -> Specialty {
        self.specialty.unwrap_or_default()
    }

    /// Article language sent to the library.
    pub fn effective_language(&self) -> SearchLanguage {
        self.language.unwrap_or_default()
    }

    /// Result cap sent to the library.
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}

/// Parameters for the dashboard literature search.
pub fn case_search(query: impl Into<String>, language: UiLanguage) -> LibrarySearchParams {
    LibrarySearchParams::new(query)
        .specialty(Specialty::Geriatrics)
        .language(search_language_for(language))
        .limit(CASE_SEARCH_LIMIT)
}

/// English search term for a symptom.
///
/// Known Hebrew symptoms are translated only when the resident works in
/// Hebrew; any other input is returned unchanged.
///
/// # Examples
/// ```
/// use geriatrics_portal::domain::{UiLanguage, translate_symptom};
///
/// assert_eq!(translate_symptom("בלבול", UiLanguage::Hebrew), "confusion delirium");
/// assert_eq!(translate_symptom("בלבול", UiLanguage::English), "בלבול");
/// assert_eq!(translate_symptom("syncope", UiLanguage::Hebrew), "syncope");
/// ```
pub fn translate_symptom(symptom: &str, language: UiLanguage) -> &str {
    if language != UiLanguage::Hebrew {
        return symptom;
    }
    HEBREW_SYMPTOM_TERMS
        .iter()
        .find(|(hebrew, _)| *hebrew == symptom)
        .map_or(symptom, |(_, english)| english)
}

/// Parameters for researching one symptom.
pub fn symptom_search(symptom: &str, language: UiLanguage) -> LibrarySearchParams {
    let term = translate_symptom(symptom, language);
    LibrarySearchParams::new(format!("{term} geriatrics elderly"))
        .specialty(Specialty::Geriatrics)
        .language(SearchLanguage::Both)
        .limit(SYMPTOM_SEARCH_LIMIT)
}

/// Parameters for the Israeli geriatrics guideline listing.
pub fn guidelines_search() -> LibrarySearchParams {
    LibrarySearchParams::new(GUIDELINES_QUERY)
        .specialty(Specialty::Geriatrics)
        .language(SearchLanguage::Both)
        .limit(GUIDELINES_SEARCH_LIMIT)
}

/// Build a short library query from free clinical text: the first three
/// recognised geriatric key terms, or a generic query when none match.
///
/// # Examples
/// ```
/// use geriatrics_portal::domain::extract_key_terms;
///
/// assert_eq!(
///     extract_key_terms("Recurrent Falls, new confusion and falls at night, dementia, depression"),
///     "Falls confusion falls"
/// );
/// assert_eq!(extract_key_terms("hip fracture"), "geriatrics elderly");
/// ```
pub fn extract_key_terms(text: &str) -> String {
    let terms: Vec<&str> = KEY_TERM_PATTERN
        .find_iter(text)
        .take(MAX_KEY_TERMS)
        .map(|found| found.as_str())
        .collect();
    if terms.is_empty() {
        FALLBACK_KEY_TERMS.to_owned()
    } else {
        terms.join(" ")
    }
}

/// Article identifier. The library emits both string and numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Library article as exposed by the portal API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalArticle {
    pub id: ArticleId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_he: Option<String>,
    pub authors: Vec<String>,
    pub journal: String,
    pub published_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_he: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub keywords: Vec<String>,
    pub specialty: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

/// Article pointer inside an LLM literature analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantArticle {
    pub id: ArticleId,
    pub title: String,
    pub relevance_score: f64,
}

/// LLM narration of the search results for a clinical case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteratureAnalysis {
    pub analysis: String,
    pub relevant_articles: Vec<RelevantArticle>,
}
