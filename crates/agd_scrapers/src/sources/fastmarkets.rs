use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

use super::{utils, Scraper, SourceMetadata};

/// Fastmarkets grains & oilseeds desk.
#[derive(Debug, Clone)]
pub struct FastmarketsScraper;

impl FastmarketsScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.fastmarkets.com/agriculture/grains-and-oilseeds/";
    const LINK_SELECTOR: &'static str = "a[href*='/news/'], a[href*='/analysis/']";
}

impl Default for FastmarketsScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for FastmarketsScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Fastmarkets Agriculture".to_string(),
            url: Self::BASE_URL.to_string(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("fastmarkets.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["fastmarkets"]
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
