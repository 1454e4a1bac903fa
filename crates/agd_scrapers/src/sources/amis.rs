use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

use super::{utils, Scraper, SourceMetadata};

/// AMIS market monitor (Agricultural Market Information System).
#[derive(Debug, Clone)]
pub struct AmisScraper;

impl AmisScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.amis-outlook.org/home";
    const LINK_SELECTOR: &'static str = "a[href*='/news/'], a[href*='/article/']";
}

impl Default for AmisScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for AmisScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "AMIS Outlook".to_string(),
            url: Self::BASE_URL.to_string(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("amis-outlook.org")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["amis"]
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
