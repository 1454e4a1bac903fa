use agd_core::{Article, KeywordConfig};

/// Keeps only articles that look like agriculture-market coverage.
///
/// An article survives when the case-folded title+summary text contains at
/// least two relevance keywords, or the title alone contains at least one. A
/// title match is a stronger signal, hence the lower threshold.
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            keywords: config.relevance.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn filter(&self, articles: Vec<Article>) -> Vec<Article> {
        articles
            .into_iter()
            .filter(|article| self.is_relevant(article))
            .collect()
    }

    pub fn is_relevant(&self, article: &Article) -> bool {
        let combined = article.combined_text();
        let title = article.title.to_lowercase();

        let mut combined_hits = 0;
        for keyword in &self.keywords {
            if title.contains(keyword.as_str()) {
                return true;
            }
            if combined.contains(keyword.as_str()) {
                combined_hits += 1;
                if combined_hits >= 2 {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agd_core::Language;

    fn filter() -> RelevanceFilter {
        RelevanceFilter::new(&KeywordConfig::for_language(Language::English))
    }

    #[test]
    fn keeps_article_with_single_title_keyword() {
        let articles = vec![Article::new("Wheat outlook revised", "Nothing else here.", "test")];
        assert_eq!(filter().filter(articles).len(), 1);
    }

    #[test]
    fn keeps_article_with_two_body_keywords() {
        let articles = vec![Article::new(
            "Quarterly report published",
            "The harvest season boosted grain volumes across the region.",
            "test",
        )];
        assert_eq!(filter().filter(articles).len(), 1);
    }

    #[test]
    fn rejects_article_with_one_body_keyword_only() {
        let articles = vec![Article::new(
            "Quarterly report published",
            "Analysts mention the harvest in passing.",
            "test",
        )];
        assert!(filter().filter(articles).is_empty());
    }

    #[test]
    fn rejects_empty_article() {
        let articles = vec![Article::new("", "", "test")];
        assert!(filter().filter(articles).is_empty());
    }

    #[test]
    fn rejects_offtopic_article() {
        let articles = vec![Article::new(
            "Football finals tonight",
            "The championship match kicks off at eight.",
            "test",
        )];
        assert!(filter().filter(articles).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let articles = vec![
            Article::new("Wheat outlook revised", "", "test"),
            Article::new("Football finals tonight", "", "test"),
            Article::new("Corn harvest ahead of schedule", "Grain exports to follow.", "test"),
        ];
        let filter = filter();
        let once = filter.filter(articles);
        let twice = filter.filter(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn matches_russian_keywords() {
        let filter = RelevanceFilter::new(&KeywordConfig::for_language(Language::Russian));
        let articles = vec![Article::new(
            "Пшеница дорожает на фоне засухи",
            "Экспорт зерна сократился.",
            "АПК-Информ",
        )];
        assert_eq!(filter.filter(articles).len(), 1);
    }
}
