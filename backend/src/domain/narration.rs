//! Prompt construction for the literature narrator.
//!
//! The narrator receives a clinical case and the top search results and
//! returns free text. Everything here is pure so prompts can be asserted in
//! tests without an LLM.

use super::literature::{LiteratureAnalysis, MedicalArticle, RelevantArticle, UiLanguage};

const CONTEXT_ARTICLES: usize = 5;
const RELEVANT_ARTICLES: usize = 3;
const ABSTRACT_PREVIEW_CHARS: usize = 500;
const DEFAULT_RELEVANCE: f64 = 0.8;
const ARTICLE_SEPARATOR: &str = "\n\n---\n\n";

const HEBREW_SYSTEM_PROMPT: &str = "אתה רופא גריאטר מומחה בישראל. נתח את המקרה הקליני והמאמרים הרלוונטיים וספק:
1. המאמרים הרלוונטיים ביותר למקרה
2. המלצות טיפוליות מבוססות על הספרות הרפואית
3. הנחיות ישראליות רלוונטיות
השב בעברית.";

const ENGLISH_SYSTEM_PROMPT: &str = "You are a geriatrician expert in Israel. Analyze the clinical case and relevant articles and provide:
1. Most relevant articles to the case
2. Evidence-based treatment recommendations
3. Relevant Israeli guidelines
Respond in English.";

/// A single system + user prompt pair handed to the narrator port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationRequest {
    pub system: String,
    pub user: String,
}

impl NarrationRequest {
    /// Build the prompts for `clinical_case` against `articles`.
    pub fn for_case(clinical_case: &str, articles: &[MedicalArticle], language: UiLanguage) -> Self {
        Self {
            system: system_prompt(language).to_owned(),
            user: user_prompt(clinical_case, &articles_context(articles)),
        }
    }
}

/// Geriatrician persona in the resident's language.
pub fn system_prompt(language: UiLanguage) -> &'static str {
    match language {
        UiLanguage::Hebrew => HEBREW_SYSTEM_PROMPT,
        UiLanguage::English => ENGLISH_SYSTEM_PROMPT,
    }
}

/// Render the first five articles as plain-text context blocks.
///
/// Abstracts are cut to 500 characters and always followed by `...`.
pub fn articles_context(articles: &[MedicalArticle]) -> String {
    articles
        .iter()
        .take(CONTEXT_ARTICLES)
        .map(|article| {
            let preview: String = article
                .abstract_text
                .chars()
                .take(ABSTRACT_PREVIEW_CHARS)
                .collect();
            format!(
                "Title: {}\nAuthors: {}\nAbstract: {preview}...",
                article.title,
                article.authors.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join(ARTICLE_SEPARATOR)
}

/// User turn combining the case with the literature context.
pub fn user_prompt(clinical_case: &str, context: &str) -> String {
    format!(
        "Clinical Case:\n{clinical_case}\n\nRelevant Literature:\n{context}\n\nPlease provide your analysis and recommendations."
    )
}

/// Pointers to the three top-ranked articles.
pub fn relevant_articles(articles: &[MedicalArticle]) -> Vec<RelevantArticle> {
    articles
        .iter()
        .take(RELEVANT_ARTICLES)
        .map(|article| RelevantArticle {
            id: article.id.clone(),
            title: article.title.clone(),
            relevance_score: article
                .relevance_score
                .filter(|score| *score != 0.0)
                .unwrap_or(DEFAULT_RELEVANCE),
        })
        .collect()
}

/// Pair narrator output with the article pointers it refers to.
pub fn literature_analysis(text: String, articles: &[MedicalArticle]) -> LiteratureAnalysis {
    LiteratureAnalysis {
        analysis: text,
        relevant_articles: relevant_articles(articles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::literature::ArticleId;
    use rstest::{fixture, rstest};

    fn article(id: &str, score: Option<f64>) -> MedicalArticle {
        MedicalArticle {
            id: ArticleId::new(id),
            title: format!("Title {id}"),
            authors: vec!["Cohen A".to_owned(), "Levi B".to_owned()],
            abstract_text: format!("Abstract {id}"),
            relevance_score: score,
            ..MedicalArticle::default()
        }
    }

    #[fixture]
    fn seven_articles() -> Vec<MedicalArticle> {
        (1..=7).map(|n| article(&n.to_string(), None)).collect()
    }

    #[rstest]
    fn context_uses_first_five_articles(seven_articles: Vec<MedicalArticle>) {
        let context = articles_context(&seven_articles);
        assert_eq!(context.matches("Title: ").count(), 5);
        assert!(context.starts_with("Title: Title 1\nAuthors: Cohen A, Levi B\nAbstract: Abstract 1..."));
        assert!(!context.contains("Title 6"));
        assert_eq!(context.matches(ARTICLE_SEPARATOR).count(), 4);
    }

    #[rstest]
    fn long_abstracts_are_cut_at_five_hundred_chars() {
        let mut long = article("x", None);
        long.abstract_text = "א".repeat(600);
        let context = articles_context(&[long]);
        let expected = format!("Abstract: {}...", "א".repeat(500));
        assert!(context.ends_with(&expected));
    }

    #[rstest]
    fn user_prompt_frames_case_and_context() {
        assert_eq!(
            user_prompt("falls", "ctx"),
            "Clinical Case:\nfalls\n\nRelevant Literature:\nctx\n\nPlease provide your analysis and recommendations."
        );
    }

    #[rstest]
    #[case::hebrew(UiLanguage::Hebrew, "השב בעברית.")]
    #[case::english(UiLanguage::English, "Respond in English.")]
    fn system_prompt_follows_language(#[case] language: UiLanguage, #[case] closing: &str) {
        assert!(system_prompt(language).ends_with(closing));
    }

    #[rstest]
    fn relevant_articles_default_missing_scores(seven_articles: Vec<MedicalArticle>) {
        let mut articles = seven_articles;
        articles[1].relevance_score = Some(0.95);
        let relevant = relevant_articles(&articles);
        let scores: Vec<f64> = relevant.iter().map(|a| a.relevance_score).collect();
        assert_eq!(scores, vec![0.8, 0.95, 0.8]);
        assert_eq!(relevant[2].id, ArticleId::new("3"));
    }
}
