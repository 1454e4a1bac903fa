use tracing::info;

use agd_core::Language;
use agd_pipeline::{DigestOutcome, DigestPipeline};
use agd_scrapers::{sources::SourceMetadata, SourceManager};

/// End-to-end digest generation: fetch every source, run the pipeline, and
/// turn the outcome into user-facing text. Each call is an independent run
/// over a fresh article batch.
pub struct DigestService {
    sources: SourceManager,
    pipeline: DigestPipeline,
    language: Language,
}

impl DigestService {
    pub fn new(sources: SourceManager, pipeline: DigestPipeline, language: Language) -> Self {
        Self {
            sources,
            pipeline,
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn sources(&self) -> Vec<SourceMetadata> {
        self.sources.sources()
    }

    pub async fn generate(&self) -> DigestOutcome {
        info!("starting digest generation");
        let raw = self.sources.fetch_all().await;
        let outcome = self.pipeline.run(raw).await;
        match &outcome {
            DigestOutcome::NoArticles => info!("no articles fetched"),
            DigestOutcome::NoRelevantNews => info!("no relevant articles after filtering"),
            DigestOutcome::Digest(text) => info!(chars = text.len(), "digest generated"),
        }
        outcome
    }

    /// The message a user or channel receives. The two empty outcomes get
    /// explicit no-news strings, never an empty message and never an error.
    pub fn render_outcome(&self, outcome: &DigestOutcome) -> String {
        match (outcome, self.language) {
            (DigestOutcome::NoArticles, Language::Russian) => {
                "📰 Сегодня не удалось получить новости из источников.".to_string()
            }
            (DigestOutcome::NoArticles, Language::English) => {
                "📰 No articles found from any sources today.".to_string()
            }
            (DigestOutcome::NoRelevantNews, Language::Russian) => {
                "🌾 Сегодня новостей сельского хозяйства не найдено.".to_string()
            }
            (DigestOutcome::NoRelevantNews, Language::English) => {
                "🌾 No agriculture-related news found today.".to_string()
            }
            (DigestOutcome::Digest(text), _) => text.clone(),
        }
    }

    pub async fn generate_message(&self) -> String {
        let outcome = self.generate().await;
        self.render_outcome(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agd_core::{
        CategoryConfig, DigestConfig, KeywordConfig, ScrapeConfig, SourceCredibility,
    };

    fn service(language: Language) -> DigestService {
        let keywords = KeywordConfig::for_language(language);
        let pipeline = DigestPipeline::from_config(
            DigestConfig::for_language(language),
            &keywords,
            CategoryConfig::for_language(language),
            SourceCredibility::default(),
        );
        let sources = SourceManager::new(ScrapeConfig::default()).unwrap();
        DigestService::new(sources, pipeline, language)
    }

    #[test]
    fn empty_outcomes_render_distinct_messages() {
        let service = service(Language::English);
        let none = service.render_outcome(&DigestOutcome::NoArticles);
        let irrelevant = service.render_outcome(&DigestOutcome::NoRelevantNews);
        assert_ne!(none, irrelevant);
        assert!(!none.is_empty());
        assert!(!irrelevant.is_empty());
    }

    #[test]
    fn no_news_message_is_localized() {
        let service = service(Language::Russian);
        let message = service.render_outcome(&DigestOutcome::NoRelevantNews);
        assert!(message.contains("не найдено"));
    }

    #[test]
    fn digest_outcome_renders_verbatim() {
        let service = service(Language::English);
        let message = service.render_outcome(&DigestOutcome::Digest("the digest".to_string()));
        assert_eq!(message, "the digest");
    }

    #[tokio::test]
    async fn generate_with_no_sources_reports_no_articles() {
        // A manager without any scrapers fetches nothing.
        let outcome = service(Language::English).generate().await;
        assert_eq!(outcome, DigestOutcome::NoArticles);
    }
}
