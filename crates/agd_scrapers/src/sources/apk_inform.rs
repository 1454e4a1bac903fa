use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

use super::{utils, Scraper, SourceMetadata};

/// APK-Inform agency, Russian-language news feed.
#[derive(Debug, Clone)]
pub struct ApkInformScraper;

impl ApkInformScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.apk-inform.com/ru/news";
    const LINK_SELECTOR: &'static str = "a[href*='/news/'], a[href*='/ru/news/']";
}

impl Default for ApkInformScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for ApkInformScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "APK-Inform".to_string(),
            url: Self::BASE_URL.to_string(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("apk-inform.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["apk-inform", "apkinform"]
    }

    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Article>> {
        let mut articles = utils::fetch_index_articles(
            client,
            Self::BASE_URL,
            Self::LINK_SELECTOR,
            &self.metadata().name,
            limit,
        )
        .await?;
        // The index repeats the section landing page among article links.
        articles.retain(|a| a.link.as_deref() != Some(Self::BASE_URL));
        Ok(articles)
    }
}
