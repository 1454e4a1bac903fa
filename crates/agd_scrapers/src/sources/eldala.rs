use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

use super::{utils, Scraper, SourceMetadata};

/// Eldala.kz agricultural portal.
#[derive(Debug, Clone)]
pub struct EldalaScraper;

impl EldalaScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://eldala.kz/";
    const LINK_SELECTOR: &'static str = "a[href*='/news/'], a[href*='/article/']";

    fn is_article_url(url: &str) -> bool {
        // Skip media and tag listings that share the /news/ prefix.
        !url.contains("/video/") && !url.contains("/tags/") && !url.contains("?page=")
    }
}

impl Default for EldalaScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for EldalaScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Eldala.kz".to_string(),
            url: Self::BASE_URL.to_string(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("eldala.kz")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["eldala"]
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
        articles.retain(|a| a.link.as_deref().map_or(true, Self::is_article_url));
        Ok(articles)
    }
}
