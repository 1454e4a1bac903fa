use std::cmp::Reverse;

use async_trait::async_trait;
use tracing::{info, warn};

use agd_core::{Article, KeywordConfig, RankStrategy, Result, SourceCredibility};

/// Local additive scorer. Never fails for any input, which makes it the
/// terminal fallback when every external ranking strategy is exhausted.
pub struct HeuristicRanker {
    high_impact: Vec<String>,
    commodity: Vec<String>,
    credibility: SourceCredibility,
    max_articles: usize,
}

impl HeuristicRanker {
    pub fn new(
        keywords: &KeywordConfig,
        credibility: SourceCredibility,
        max_articles: usize,
    ) -> Self {
        Self {
            high_impact: keywords.high_impact.iter().map(|k| k.to_lowercase()).collect(),
            commodity: keywords.commodity.iter().map(|k| k.to_lowercase()).collect(),
            credibility,
            max_articles,
        }
    }

    pub fn cap(&self) -> usize {
        self.max_articles
    }

    /// Additive importance score. A title hit outweighs (and suppresses) a
    /// summary hit for the same keyword.
    pub fn score(&self, article: &Article) -> u32 {
        let title = article.title.to_lowercase();
        let summary = article.summary.to_lowercase();
        let mut score = 0;

        for keyword in &self.high_impact {
            if title.contains(keyword.as_str()) {
                score += 3;
            } else if summary.contains(keyword.as_str()) {
                score += 2;
            }
        }
        for keyword in &self.commodity {
            if title.contains(keyword.as_str()) {
                score += 2;
            } else if summary.contains(keyword.as_str()) {
                score += 1;
            }
        }

        score += self.credibility.bonus_for(&article.source);

        if article.summary.chars().count() > 100 {
            score += 1;
        }
        if article.published.as_deref().map_or(false, |p| !p.is_empty()) {
            score += 1;
        }

        score
    }

    /// Score, stable-sort descending, truncate to the cap, and stamp the
    /// derived `importance_score`/`rank_position` fields. Equal-score
    /// articles keep their input order.
    pub fn rank(&self, articles: Vec<Article>) -> Vec<Article> {
        let mut scored: Vec<(u32, Article)> = articles
            .into_iter()
            .map(|article| (self.score(&article), article))
            .collect();
        scored.sort_by_key(|(score, _)| Reverse(*score));

        scored
            .into_iter()
            .take(self.max_articles)
            .enumerate()
            .map(|(index, (score, mut article))| {
                article.importance_score = Some(score);
                article.rank_position = Some(index + 1);
                article
            })
            .collect()
    }
}

#[async_trait]
impl RankStrategy for HeuristicRanker {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn rank(&self, articles: &[Article]) -> Result<Vec<Article>> {
        Ok(HeuristicRanker::rank(self, articles.to_vec()))
    }
}

/// Explicit ordered list of ranking strategies with the heuristic as the
/// infallible fallback. Each attempt is logged by strategy name instead of
/// being swallowed.
pub struct Ranker {
    strategies: Vec<Box<dyn RankStrategy>>,
    fallback: HeuristicRanker,
}

impl Ranker {
    pub fn new(fallback: HeuristicRanker) -> Self {
        Self {
            strategies: Vec::new(),
            fallback,
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn RankStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub async fn rank(&self, articles: Vec<Article>) -> Vec<Article> {
        for strategy in &self.strategies {
            match strategy.rank(&articles).await {
                Ok(ranked) => {
                    if !drawn_from_input(&articles, &ranked) {
                        warn!(
                            strategy = strategy.name(),
                            "strategy returned articles not drawn from its input, skipping"
                        );
                        continue;
                    }
                    info!(
                        strategy = strategy.name(),
                        count = ranked.len(),
                        "ranking strategy produced the ordering"
                    );
                    return finalize(ranked, self.fallback.cap());
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "ranking strategy failed");
                }
            }
        }

        info!(strategy = "heuristic", "using local fallback ranking");
        self.fallback.rank(articles)
    }
}

/// Cap a strategy's output and stamp 1-based positions.
fn finalize(mut ranked: Vec<Article>, cap: usize) -> Vec<Article> {
    ranked.truncate(cap);
    for (index, article) in ranked.iter_mut().enumerate() {
        article.rank_position = Some(index + 1);
    }
    ranked
}

/// True when `ranked` is a permutation of a subset of `input` — a strategy
/// must never synthesize or duplicate articles.
fn drawn_from_input(input: &[Article], ranked: &[Article]) -> bool {
    if ranked.len() > input.len() {
        return false;
    }
    let mut pool: Vec<&Article> = input.iter().collect();
    ranked.iter().all(|candidate| {
        match pool
            .iter()
            .position(|a| a.title == candidate.title && a.source == candidate.source)
        {
            Some(index) => {
                pool.remove(index);
                true
            }
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agd_core::{Error, Language};

    fn ranker_with_cap(cap: usize) -> HeuristicRanker {
        HeuristicRanker::new(
            &KeywordConfig::for_language(Language::English),
            SourceCredibility::default(),
            cap,
        )
    }

    #[test]
    fn title_keyword_outscores_summary_keyword() {
        let ranker = ranker_with_cap(8);
        let in_title = Article::new("Wheat price jumps", "", "test");
        let in_summary = Article::new("Daily report", "wheat price jumps", "test");
        assert!(ranker.score(&in_title) > ranker.score(&in_summary));
    }

    #[test]
    fn title_hit_suppresses_summary_hit_for_same_keyword() {
        let ranker = ranker_with_cap(8);
        let title_only = Article::new("Drought hits the plains", "", "test");
        let both = Article::new("Drought hits the plains", "the drought persists", "test");
        assert_eq!(ranker.score(&title_only), ranker.score(&both));
    }

    #[test]
    fn long_summary_and_published_add_one_each() {
        let ranker = ranker_with_cap(8);
        let base = Article::new("Quarterly note", "short", "nobody");
        let long = Article::new("Quarterly note", "x".repeat(150), "nobody");
        let dated = Article::new("Quarterly note", "short", "nobody").with_published("2026-08-07");
        assert_eq!(ranker.score(&long), ranker.score(&base) + 1);
        assert_eq!(ranker.score(&dated), ranker.score(&base) + 1);
    }

    #[test]
    fn empty_published_earns_no_bonus() {
        let ranker = ranker_with_cap(8);
        let base = Article::new("Quarterly note", "short", "nobody");
        let blank = Article::new("Quarterly note", "short", "nobody").with_published("");
        assert_eq!(ranker.score(&blank), ranker.score(&base));
    }

    #[test]
    fn rank_respects_cap_and_input_length() {
        let ranker = ranker_with_cap(2);
        let articles = vec![
            Article::new("Wheat prices rise", "", "Fastmarkets"),
            Article::new("Corn exports fall", "", "Margin.kz"),
            Article::new("Local fair opens", "", "nobody"),
        ];
        let ranked = ranker.rank(articles);
        assert_eq!(ranked.len(), 2);

        let ranked = ranker_with_cap(10).rank(vec![Article::new("Wheat", "", "test")]);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn zero_cap_yields_empty_list() {
        let ranked = ranker_with_cap(0).rank(vec![Article::new("Wheat prices rise", "", "test")]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(ranker_with_cap(8).rank(Vec::new()).is_empty());
    }

    #[test]
    fn equal_scores_preserve_input_order() {
        let ranker = ranker_with_cap(8);
        let articles = vec![
            Article::new("no keywords here one", "", "nobody"),
            Article::new("no keywords here two", "", "nobody"),
            Article::new("no keywords here three", "", "nobody"),
        ];
        let ranked = ranker.rank(articles.clone());
        let titles: Vec<&str> = ranked.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["no keywords here one", "no keywords here two", "no keywords here three"]
        );
    }

    #[test]
    fn rank_is_deterministic() {
        let ranker = ranker_with_cap(8);
        let articles = vec![
            Article::new("Wheat prices rise 15%", "", "Fastmarkets"),
            Article::new("New drone technology launched", "", "APK-Inform"),
            Article::new("Export tariffs increased", "", "Margin.kz"),
        ];
        let first = ranker.rank(articles.clone());
        let second = ranker.rank(articles);
        assert_eq!(first, second);
    }

    #[test]
    fn rank_stamps_score_and_position() {
        let ranker = ranker_with_cap(8);
        let ranked = ranker.rank(vec![
            Article::new("Wheat prices rise", "", "Fastmarkets"),
            Article::new("Village news", "", "nobody"),
        ]);
        assert_eq!(ranked[0].rank_position, Some(1));
        assert_eq!(ranked[1].rank_position, Some(2));
        assert!(ranked[0].importance_score.unwrap() > ranked[1].importance_score.unwrap());
    }

    struct FailingStrategy;

    #[async_trait]
    impl RankStrategy for FailingStrategy {
        fn name(&self) -> &str {
            "failing"
        }

        async fn rank(&self, _articles: &[Article]) -> Result<Vec<Article>> {
            Err(Error::Inference("service unavailable".to_string()))
        }
    }

    struct SynthesizingStrategy;

    #[async_trait]
    impl RankStrategy for SynthesizingStrategy {
        fn name(&self) -> &str {
            "synthesizing"
        }

        async fn rank(&self, _articles: &[Article]) -> Result<Vec<Article>> {
            Ok(vec![Article::new("made up", "", "nowhere")])
        }
    }

    struct ReversingStrategy;

    #[async_trait]
    impl RankStrategy for ReversingStrategy {
        fn name(&self) -> &str {
            "reversing"
        }

        async fn rank(&self, articles: &[Article]) -> Result<Vec<Article>> {
            let mut reversed = articles.to_vec();
            reversed.reverse();
            Ok(reversed)
        }
    }

    #[tokio::test]
    async fn failed_strategy_falls_back_to_heuristic() {
        let ranker = Ranker::new(ranker_with_cap(8)).with_strategy(Box::new(FailingStrategy));
        let ranked = ranker
            .rank(vec![
                Article::new("Wheat prices rise", "", "Fastmarkets"),
                Article::new("Village news", "", "nobody"),
            ])
            .await;
        // Heuristic ordering: the scored article first.
        assert_eq!(ranked[0].title, "Wheat prices rise");
        assert!(ranked[0].importance_score.is_some());
    }

    #[tokio::test]
    async fn synthesized_output_is_rejected() {
        let ranker = Ranker::new(ranker_with_cap(8)).with_strategy(Box::new(SynthesizingStrategy));
        let ranked = ranker
            .rank(vec![Article::new("Wheat prices rise", "", "Fastmarkets")])
            .await;
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Wheat prices rise");
    }

    #[tokio::test]
    async fn successful_strategy_ordering_is_used_and_capped() {
        let ranker = Ranker::new(ranker_with_cap(2)).with_strategy(Box::new(ReversingStrategy));
        let ranked = ranker
            .rank(vec![
                Article::new("first", "", "a"),
                Article::new("second", "", "b"),
                Article::new("third", "", "c"),
            ])
            .await;
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "third");
        assert_eq!(ranked[0].rank_position, Some(1));
        assert_eq!(ranked[1].title, "second");
    }
}
