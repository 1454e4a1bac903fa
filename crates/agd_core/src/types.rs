use serde::{Deserialize, Serialize};

/// One raw news item as produced by a source fetcher.
///
/// Only `title`, `summary` and `source` are guaranteed by fetchers; both text
/// fields may be empty. The remaining `Option` fields are filled in by
/// pipeline stages and are `None` on raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_position: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            source: source.into(),
            link: None,
            published: None,
            importance_score: None,
            rank_position: None,
            category: None,
            ai_summary: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    /// Case-folded title and summary joined for keyword matching.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_is_case_folded() {
        let article = Article::new("Wheat Prices", "EXPORT volumes up", "test");
        assert_eq!(article.combined_text(), "wheat prices export volumes up");
    }

    #[test]
    fn combined_text_tolerates_empty_fields() {
        let article = Article::new("", "", "test");
        assert_eq!(article.combined_text(), " ");
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let raw = r#"{"title":"t","summary":"s","source":"src"}"#;
        let article: Article = serde_json::from_str(raw).unwrap();
        assert_eq!(article.link, None);
        assert_eq!(article.published, None);
        assert_eq!(article.importance_score, None);
    }

    #[test]
    fn derived_fields_are_skipped_when_unset() {
        let article = Article::new("t", "s", "src");
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("importance_score"));
        assert!(!json.contains("rank_position"));
        assert!(!json.contains("ai_summary"));
    }
}
