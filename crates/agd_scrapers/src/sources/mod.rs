use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Result};

pub mod amis;
pub mod apk_inform;
pub mod apk_news;
pub mod eldala;
pub mod fastmarkets;
pub mod margin;
pub mod rss;

pub use amis::AmisScraper;
pub use apk_inform::ApkInformScraper;
pub use apk_news::ApkNewsScraper;
pub use eldala::EldalaScraper;
pub use fastmarkets::FastmarketsScraper;
pub use margin::MarginScraper;
pub use rss::RssScraper;

#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub url: String,
}

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Name and index URL of the news source
    fn metadata(&self) -> SourceMetadata;

    /// Returns true if this scraper is responsible for the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Fetches up to `limit` articles from the source's index page
    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Article>>;

    /// CLI shorthand names for this scraper
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{Html, Selector};
    use url::Url;

    use agd_core::Error;

    use super::*;

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {:?}: {}", selector, e)))
    }

    /// Collapse runs of whitespace into single spaces.
    pub fn normalize_ws(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn absolutize(base: &str, href: &str) -> Option<String> {
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        let base = Url::parse(base).ok()?;
        base.join(href).ok().map(|u| u.to_string())
    }

    /// Candidate article links from an index page: (absolute URL, anchor
    /// text), duplicates removed, document order preserved.
    pub fn candidate_links(document: &Html, selector: &str, base: &str) -> Result<Vec<(String, String)>> {
        let selector = parse_selector(selector)?;
        let mut links = Vec::new();
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(href) => href,
                None => continue,
            };
            let url = match absolutize(base, href) {
                Some(url) => url,
                None => continue,
            };
            if links.iter().any(|(existing, _)| *existing == url) {
                continue;
            }
            let text = normalize_ws(&element.text().collect::<String>());
            links.push((url, text));
        }
        Ok(links)
    }

    /// First substantive paragraphs of an article page joined into one
    /// excerpt, capped at 500 characters.
    pub fn article_excerpt(document: &Html, max_paragraphs: usize) -> String {
        let selector = match Selector::parse("article p, .content p, main p, p") {
            Ok(selector) => selector,
            Err(_) => return String::new(),
        };
        let paragraphs: Vec<String> = document
            .select(&selector)
            .map(|p| normalize_ws(&p.text().collect::<String>()))
            .filter(|text| text.chars().count() > 20)
            .take(max_paragraphs)
            .collect();
        let mut excerpt = paragraphs.join(" ");
        if excerpt.chars().count() > 500 {
            excerpt = excerpt.chars().take(500).collect::<String>() + "...";
        }
        excerpt
    }

    /// Shared index-page scrape: select candidate links, keep anchors with a
    /// plausible headline, fetch each article page for an excerpt.
    pub async fn fetch_index_articles(
        client: &Client,
        index_url: &str,
        link_selector: &str,
        source_name: &str,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let html = client.get(index_url).send().await?.text().await?;
        let links = {
            let document = Html::parse_document(&html);
            candidate_links(&document, link_selector, index_url)?
        };

        let mut articles = Vec::new();
        for (url, anchor_text) in links {
            if articles.len() >= limit {
                break;
            }
            if anchor_text.chars().count() < 10 {
                continue;
            }
            let summary = match client.get(&url).send().await {
                Ok(response) => match response.text().await {
                    Ok(page) => article_excerpt(&Html::parse_document(&page), 3),
                    Err(_) => String::new(),
                },
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "article page fetch failed");
                    String::new()
                }
            };
            articles.push(Article::new(anchor_text, summary, source_name).with_link(url));
        }
        Ok(articles)
    }
}
