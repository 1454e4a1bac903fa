use async_trait::async_trait;
use reqwest::Client;

use agd_core::{Article, Error, Result};

use super::{utils, Scraper, SourceMetadata};

/// Generic RSS/Atom source. Any feed becomes a scraper by giving it a name
/// and a feed URL.
#[derive(Debug, Clone)]
pub struct RssScraper {
    name: String,
    feed_url: String,
}

impl RssScraper {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
        }
    }
}

/// Drop markup from a feed summary, leaving plain text.
fn strip_tags(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                output.push(' ');
            }
            c if !in_tag => output.push(c),
            _ => {}
        }
    }
    utils::normalize_ws(&output.replace("&nbsp;", " ").replace("&amp;", "&"))
}

#[async_trait]
impl Scraper for RssScraper {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: self.name.clone(),
            url: self.feed_url.clone(),
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        url == self.feed_url
    }

    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Article>> {
        let bytes = client.get(&self.feed_url).send().await?.bytes().await?;
        let feed = feed_rs::parser::parse(&bytes[..])
            .map_err(|e| Error::Feed(format!("{}: {}", self.feed_url, e)))?;

        let articles = feed
            .entries
            .into_iter()
            .take(limit)
            .filter_map(|entry| {
                let title = entry.title.map(|t| utils::normalize_ws(&t.content))?;
                if title.is_empty() {
                    return None;
                }

                let mut summary = entry
                    .summary
                    .map(|s| strip_tags(&s.content))
                    .unwrap_or_default();
                if summary.chars().count() > 500 {
                    summary = summary.chars().take(500).collect::<String>() + "...";
                }

                let mut article = Article::new(title, summary, self.name.clone());
                if let Some(link) = entry.links.first() {
                    article = article.with_link(link.href.clone());
                }
                if let Some(published) = entry.published.or(entry.updated) {
                    article = article.with_published(published.to_rfc3339());
                }
                Some(article)
            })
            .collect();

        Ok(articles)
    }
}
