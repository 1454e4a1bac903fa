pub mod categorize;
pub mod digest;
pub mod filter;
pub mod rank;

pub use categorize::Categorizer;
pub use digest::DigestFormatter;
pub use filter::RelevanceFilter;
pub use rank::{HeuristicRanker, Ranker};

use tracing::info;

use agd_core::{Article, CategoryConfig, DigestConfig, KeywordConfig, SourceCredibility};

/// Result of one digest-generation run. The two empty cases are distinct so
/// callers can tell "nothing fetched" from "nothing relevant" and never
/// conflate either with an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DigestOutcome {
    NoArticles,
    NoRelevantNews,
    Digest(String),
}

/// Sequential filter → rank → categorize → format over one in-memory batch.
/// Holds no state across runs; concurrent runs on independent inputs do not
/// observe each other.
pub struct DigestPipeline {
    filter: RelevanceFilter,
    ranker: Ranker,
    categorizer: Categorizer,
    formatter: DigestFormatter,
}

impl DigestPipeline {
    pub fn new(
        filter: RelevanceFilter,
        ranker: Ranker,
        categorizer: Categorizer,
        formatter: DigestFormatter,
    ) -> Self {
        Self {
            filter,
            ranker,
            categorizer,
            formatter,
        }
    }

    /// Assemble a pipeline from configuration with the heuristic ranker as
    /// the only strategy. Extra strategies can be layered via `new`.
    pub fn from_config(
        digest: DigestConfig,
        keywords: &KeywordConfig,
        categories: CategoryConfig,
        credibility: SourceCredibility,
    ) -> Self {
        let fallback = HeuristicRanker::new(keywords, credibility, digest.max_articles);
        Self {
            filter: RelevanceFilter::new(keywords),
            ranker: Ranker::new(fallback),
            categorizer: Categorizer::new(categories),
            formatter: DigestFormatter::new(digest),
        }
    }

    pub async fn run(&self, raw: Vec<Article>) -> DigestOutcome {
        if raw.is_empty() {
            return DigestOutcome::NoArticles;
        }
        let total = raw.len();

        let relevant = self.filter.filter(raw);
        info!(relevant = relevant.len(), total, "filtered articles");
        if relevant.is_empty() {
            return DigestOutcome::NoRelevantNews;
        }

        let mut ranked = self.ranker.rank(relevant).await;
        if ranked.is_empty() {
            return DigestOutcome::NoRelevantNews;
        }

        for article in &mut ranked {
            article.category = Some(self.categorizer.label_for(article).to_string());
        }

        DigestOutcome::Digest(self.formatter.format(&ranked).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agd_core::Language;

    fn pipeline(language: Language) -> DigestPipeline {
        let keywords = KeywordConfig::for_language(language);
        DigestPipeline::from_config(
            DigestConfig::for_language(language),
            &keywords,
            CategoryConfig::for_language(language),
            SourceCredibility::default(),
        )
    }

    fn fixture() -> Vec<Article> {
        vec![
            Article::new("Wheat prices rise 15%", "", "Fastmarkets"),
            Article::new("New drone technology launched", "", "APK-Inform"),
            Article::new("Export tariffs increased", "", "Margin.kz"),
        ]
    }

    #[tokio::test]
    async fn empty_input_reports_no_articles() {
        assert_eq!(
            pipeline(Language::English).run(Vec::new()).await,
            DigestOutcome::NoArticles
        );
    }

    #[tokio::test]
    async fn irrelevant_input_reports_no_relevant_news() {
        let raw = vec![Article::new(
            "Football finals tonight",
            "Kickoff at eight in the stadium.",
            "Sports Daily",
        )];
        assert_eq!(
            pipeline(Language::English).run(raw).await,
            DigestOutcome::NoRelevantNews
        );
    }

    #[tokio::test]
    async fn fixture_runs_end_to_end_in_ranked_order() {
        let outcome = pipeline(Language::English).run(fixture()).await;
        let digest = match outcome {
            DigestOutcome::Digest(text) => text,
            other => panic!("expected digest, got {:?}", other),
        };

        assert!(digest.contains("**3 articles** from 3 sources"));
        // Heuristic scores: wheat/fastmarkets > export/margin > drone/apk.
        let first = digest.find("**1. Wheat prices rise 15%**").unwrap();
        let second = digest.find("**2. Export tariffs increased**").unwrap();
        let third = digest.find("**3. New drone technology launched**").unwrap();
        assert!(first < second && second < third);
        // Categories stamped during the run surface in the overview.
        assert!(digest.contains("• Crops & Commodities"));
    }

    #[tokio::test]
    async fn empty_article_never_reaches_later_stages() {
        let mut raw = fixture();
        raw.push(Article::new("", "", "Fastmarkets"));
        let outcome = pipeline(Language::English).run(raw).await;
        let digest = match outcome {
            DigestOutcome::Digest(text) => text,
            other => panic!("expected digest, got {:?}", other),
        };
        assert!(digest.contains("**3 articles**"));
        assert!(!digest.contains("**4. "));
    }

    #[tokio::test]
    async fn runs_are_independent_and_deterministic() {
        let pipeline = pipeline(Language::Russian);
        let first = pipeline.run(fixture()).await;
        let second = pipeline.run(fixture()).await;
        assert_eq!(first, second);
    }
}
