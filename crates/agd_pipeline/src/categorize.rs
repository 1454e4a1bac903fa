use agd_core::{Article, CategoryConfig};

/// Partitions articles into topic buckets. Categories are tested in their
/// configured priority order and the first keyword match wins; anything left
/// over lands in the catch-all bucket.
pub struct Categorizer {
    categories: Vec<(String, Vec<String>)>,
    fallback_label: String,
}

impl Categorizer {
    pub fn new(config: CategoryConfig) -> Self {
        Self {
            categories: config
                .categories
                .into_iter()
                .map(|rule| {
                    let keywords = rule.keywords.iter().map(|k| k.to_lowercase()).collect();
                    (rule.label, keywords)
                })
                .collect(),
            fallback_label: config.fallback_label,
        }
    }

    /// Label an article without moving it into a bucket.
    pub fn label_for(&self, article: &Article) -> &str {
        let text = article.combined_text();
        for (label, keywords) in &self.categories {
            if keywords.iter().any(|keyword| text.contains(keyword.as_str())) {
                return label;
            }
        }
        &self.fallback_label
    }

    /// Partition into ordered `(label, articles)` buckets. Each article lands
    /// in exactly one bucket and empty buckets are omitted. Articles keep
    /// their relative order within a bucket and get their `category` field
    /// stamped.
    pub fn categorize(&self, articles: Vec<Article>) -> Vec<(String, Vec<Article>)> {
        let mut buckets: Vec<(String, Vec<Article>)> = self
            .categories
            .iter()
            .map(|(label, _)| (label.clone(), Vec::new()))
            .collect();
        buckets.push((self.fallback_label.clone(), Vec::new()));

        for mut article in articles {
            let label = self.label_for(&article).to_string();
            let bucket = buckets
                .iter_mut()
                .find(|(candidate, _)| *candidate == label)
                .expect("label always names an existing bucket");
            article.category = Some(label);
            bucket.1.push(article);
        }

        buckets.retain(|(_, members)| !members.is_empty());
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agd_core::Language;

    fn categorizer() -> Categorizer {
        Categorizer::new(CategoryConfig::for_language(Language::English))
    }

    #[test]
    fn first_matching_category_wins() {
        // "wheat" (crops) appears before "price" (market) in priority order.
        let article = Article::new("Wheat price hits record", "", "test");
        assert_eq!(categorizer().label_for(&article), "Crops & Commodities");
    }

    #[test]
    fn unmatched_article_goes_to_catch_all() {
        let article = Article::new("Village fair announced", "", "test");
        assert_eq!(categorizer().label_for(&article), "Other");
    }

    #[test]
    fn buckets_partition_the_input() {
        let articles = vec![
            Article::new("Wheat prices rise 15%", "", "Fastmarkets"),
            Article::new("New drone technology launched", "", "APK-Inform"),
            Article::new("Export tariffs increased", "", "Margin.kz"),
            Article::new("Village fair announced", "", "nobody"),
        ];
        let buckets = categorizer().categorize(articles.clone());

        let total: usize = buckets.iter().map(|(_, members)| members.len()).sum();
        assert_eq!(total, articles.len());

        // No article appears in two buckets.
        for article in &articles {
            let appearances = buckets
                .iter()
                .filter(|(_, members)| members.iter().any(|m| m.title == article.title))
                .count();
            assert_eq!(appearances, 1, "{} categorized {} times", article.title, appearances);
        }
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let buckets = categorizer().categorize(vec![Article::new("Wheat outlook", "", "test")]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].0, "Crops & Commodities");
    }

    #[test]
    fn buckets_keep_priority_order() {
        let articles = vec![
            Article::new("Export tariffs increased", "", "Margin.kz"),
            Article::new("Wheat prices rise 15%", "", "Fastmarkets"),
        ];
        let buckets = categorizer().categorize(articles);
        let labels: Vec<&str> = buckets.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["Crops & Commodities", "Market & Trade"]);
    }

    #[test]
    fn category_field_is_stamped() {
        let buckets = categorizer().categorize(vec![Article::new("Drought warning", "", "test")]);
        let article = &buckets[0].1[0];
        assert_eq!(article.category.as_deref(), Some("Weather & Environment"));
    }

    #[test]
    fn russian_text_routes_by_russian_keywords() {
        let categorizer = Categorizer::new(CategoryConfig::for_language(Language::Russian));
        let article = Article::new("Засуха угрожает посевам", "", "Margin.kz");
        assert_eq!(categorizer.label_for(&article), "Погода и экология");
    }
}
