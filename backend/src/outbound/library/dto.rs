//! DTOs for decoding SZMC library responses.
//!
//! Library records are inconsistent: identifiers arrive as strings or numbers
//! and most fields have an alternative spelling. The DTO accepts every known
//! spelling and [`ArticleDto::into_domain`] applies the fallbacks in one pass.
//! Empty strings and zero scores count as missing.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::domain::{ArticleId, MedicalArticle};

const DEFAULT_SPECIALTY: &str = "general";

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    pub(super) articles: Option<Vec<ArticleDto>>,
}

impl SearchResponseDto {
    pub(super) fn into_domain_articles(self) -> Vec<MedicalArticle> {
        self.articles
            .unwrap_or_default()
            .into_iter()
            .map(ArticleDto::into_domain)
            .collect()
    }
}

/// String-or-number scalar.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum ScalarDto {
    Text(String),
    Number(Number),
}

impl ScalarDto {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArticleDto {
    id: Option<ScalarDto>,
    #[serde(rename = "_id")]
    underscore_id: Option<ScalarDto>,
    title: Option<String>,
    title_he: Option<String>,
    #[serde(rename = "titleHebrew")]
    title_hebrew: Option<String>,
    authors: Option<Value>,
    author: Option<String>,
    journal: Option<String>,
    source: Option<String>,
    published_date: Option<String>,
    date: Option<String>,
    pmid: Option<ScalarDto>,
    doi: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    abstract_he: Option<String>,
    #[serde(rename = "abstractHebrew")]
    abstract_hebrew: Option<String>,
    full_text_url: Option<String>,
    url: Option<String>,
    pdf_url: Option<String>,
    keywords: Option<Value>,
    specialty: Option<Value>,
    relevance_score: Option<f64>,
    score: Option<f64>,
}

impl ArticleDto {
    pub(super) fn into_domain(self) -> MedicalArticle {
        let id = first_present(
            self.id.map(ScalarDto::into_text),
            self.underscore_id.map(ScalarDto::into_text),
        )
        .unwrap_or_default();
        let authors = match self.authors {
            Some(Value::Array(values)) => strings(values),
            _ => self.author.into_iter().collect(),
        };
        let keywords = match self.keywords {
            Some(Value::Array(values)) => strings(values),
            _ => Vec::new(),
        };
        let specialty = match self.specialty {
            Some(Value::Array(values)) => strings(values),
            Some(Value::String(single)) if !single.is_empty() => vec![single],
            _ => vec![DEFAULT_SPECIALTY.to_owned()],
        };
        let relevance_score = [self.relevance_score, self.score]
            .into_iter()
            .flatten()
            .find(|score| *score != 0.0);

        MedicalArticle {
            id: ArticleId::new(id),
            title: self.title.unwrap_or_default(),
            title_he: first_present(self.title_he, self.title_hebrew),
            authors,
            journal: first_present(self.journal, self.source).unwrap_or_default(),
            published_date: first_present(self.published_date, self.date).unwrap_or_default(),
            pmid: self.pmid.map(ScalarDto::into_text),
            doi: self.doi,
            abstract_text: self.abstract_text.unwrap_or_default(),
            abstract_he: first_present(self.abstract_he, self.abstract_hebrew),
            full_text_url: first_present(self.full_text_url, self.url),
            pdf_url: self.pdf_url,
            keywords,
            specialty,
            relevance_score,
        }
    }
}

fn first_present(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.filter(|value| !value.is_empty()))
}

fn strings(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn decode(value: Value) -> MedicalArticle {
        serde_json::from_value::<ArticleDto>(value)
            .expect("article dto decodes")
            .into_domain()
    }

    #[rstest]
    fn primary_spellings_map_directly() {
        let article = decode(json!({
            "id": "szmc-1",
            "title": "Deprescribing in frail elders",
            "title_he": "הפחתת תרופות בקשישים שבריריים",
            "authors": ["Cohen A", "Levi B"],
            "journal": "Harefuah",
            "published_date": "2023-04-01",
            "pmid": "37000001",
            "doi": "10.1000/xyz",
            "abstract": "Background...",
            "abstract_he": "רקע...",
            "full_text_url": "https://library.szmc.org.il/a/1",
            "pdf_url": "https://library.szmc.org.il/a/1.pdf",
            "keywords": ["polypharmacy"],
            "specialty": ["geriatrics"],
            "relevance_score": 0.93,
        }));

        assert_eq!(article.id.as_str(), "szmc-1");
        assert_eq!(article.title_he.as_deref(), Some("הפחתת תרופות בקשישים שבריריים"));
        assert_eq!(article.authors, vec!["Cohen A", "Levi B"]);
        assert_eq!(article.journal, "Harefuah");
        assert_eq!(article.pmid.as_deref(), Some("37000001"));
        assert_eq!(article.full_text_url.as_deref(), Some("https://library.szmc.org.il/a/1"));
        assert_eq!(article.relevance_score, Some(0.93));
    }

    #[rstest]
    fn alternative_spellings_are_used_as_fallbacks() {
        let article = decode(json!({
            "_id": 4711,
            "title": "Orthostatic hypotension",
            "titleHebrew": "תת לחץ דם תנוחתי",
            "author": "Katz R",
            "source": "Age and Ageing",
            "date": "2022",
            "pmid": 35999999,
            "abstractHebrew": "תקציר",
            "url": "https://doi.org/10.1/abc",
            "specialty": "cardiology",
            "score": 0.5,
        }));

        assert_eq!(article.id.as_str(), "4711");
        assert_eq!(article.title_he.as_deref(), Some("תת לחץ דם תנוחתי"));
        assert_eq!(article.authors, vec!["Katz R"]);
        assert_eq!(article.journal, "Age and Ageing");
        assert_eq!(article.published_date, "2022");
        assert_eq!(article.pmid.as_deref(), Some("35999999"));
        assert_eq!(article.abstract_he.as_deref(), Some("תקציר"));
        assert_eq!(article.full_text_url.as_deref(), Some("https://doi.org/10.1/abc"));
        assert_eq!(article.specialty, vec!["cardiology"]);
        assert_eq!(article.relevance_score, Some(0.5));
        assert_eq!(article.abstract_text, "");
    }

    #[rstest]
    fn sparse_record_gets_defaults() {
        let article = decode(json!({ "id": "x", "keywords": "not-a-list", "relevance_score": 0 }));
        assert!(article.authors.is_empty());
        assert!(article.keywords.is_empty());
        assert_eq!(article.specialty, vec![DEFAULT_SPECIALTY]);
        assert_eq!(article.relevance_score, None);
        assert_eq!(article.title, "");
    }

    #[rstest]
    #[case::missing(json!({}))]
    #[case::null(json!({ "articles": null }))]
    fn search_without_articles_is_empty(#[case] body: Value) {
        let response: SearchResponseDto = serde_json::from_value(body).expect("decodes");
        assert!(response.into_domain_articles().is_empty());
    }
}
