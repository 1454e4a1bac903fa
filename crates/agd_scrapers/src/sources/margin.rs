use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

use super::{utils, Scraper, SourceMetadata};

/// Margin.kz, Kazakh commodity market coverage.
#[derive(Debug, Clone)]
pub struct MarginScraper;

impl MarginScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://margin.kz/";
    const LINK_SELECTOR: &'static str = "a[href*='/news/'], a[href*='/article/']";
}

impl Default for MarginScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for MarginScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Margin.kz".to_string(),
            url: Self::BASE_URL.to_string(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("margin.kz")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["margin"]
    }

    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Article>> {
        utils::fetch_index_articles(
            client,
            Self::BASE_URL,
            Self::LINK_SELECTOR,
            &self.metadata().name,
            limit,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_handle_own_domain_only() {
        let scraper = MarginScraper::new();
        assert!(scraper.can_handle("https://margin.kz/news/wheat"));
        assert!(!scraper.can_handle("https://eldala.kz/news/wheat"));
    }
}
