use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

use super::{utils, Scraper, SourceMetadata};

/// APK News Kazakhstan portal.
#[derive(Debug, Clone)]
pub struct ApkNewsScraper;

impl ApkNewsScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://apk-news.kz/";
    const LINK_SELECTOR: &'static str = "a[href*='/news/'], a[href*='/article/']";
}

impl Default for ApkNewsScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for ApkNewsScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "APK News Kazakhstan".to_string(),
            url: Self::BASE_URL.to_string(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("apk-news.kz")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["apk-news", "apknews"]
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
    fn can_handle_distinguishes_apk_domains() {
        let scraper = ApkNewsScraper::new();
        assert!(scraper.can_handle("https://apk-news.kz/news/1"));
        assert!(!scraper.can_handle("https://www.apk-inform.com/ru/news/1"));
    }
}
