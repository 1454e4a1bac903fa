use reqwest::Client;
use tokio::time::sleep;
use tracing::{info, warn};

use agd_core::{Article, Error, Result, ScrapeConfig};

use crate::sources::{
    AmisScraper, ApkInformScraper, ApkNewsScraper, EldalaScraper, FastmarketsScraper,
    MarginScraper, Scraper, SourceMetadata,
};

/// Runs all configured source fetchers with a shared HTTP client, per-source
/// retry, and a polite delay between sources. One failing source never fails
/// the whole fetch.
pub struct SourceManager {
    client: Client,
    scrapers: Vec<Box<dyn Scraper>>,
    config: ScrapeConfig,
}

impl SourceManager {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            scrapers: Vec::new(),
            config,
        })
    }

    /// The fixed source set the digest monitors.
    pub fn with_default_sources(mut self) -> Self {
        self.add_scraper(Box::new(FastmarketsScraper::new()));
        self.add_scraper(Box::new(MarginScraper::new()));
        self.add_scraper(Box::new(ApkInformScraper::new()));
        self.add_scraper(Box::new(ApkNewsScraper::new()));
        self.add_scraper(Box::new(EldalaScraper::new()));
        self.add_scraper(Box::new(AmisScraper::new()));
        self
    }

    pub fn add_scraper(&mut self, scraper: Box<dyn Scraper>) {
        self.scrapers.push(scraper);
    }

    pub fn sources(&self) -> Vec<SourceMetadata> {
        self.scrapers.iter().map(|s| s.metadata()).collect()
    }

    /// Fetch every source in order. Failures are logged and skipped.
    pub async fn fetch_all(&self) -> Vec<Article> {
        let mut all = Vec::new();
        for (index, scraper) in self.scrapers.iter().enumerate() {
            if index > 0 {
                sleep(self.config.delay_between_requests()).await;
            }
            let name = scraper.metadata().name;
            match self.fetch_with_retry(scraper.as_ref()).await {
                Ok(articles) => {
                    info!(source = %name, count = articles.len(), "fetched source");
                    all.extend(articles);
                }
                Err(e) => {
                    warn!(source = %name, error = %e, "source failed, skipping");
                }
            }
        }
        info!(total = all.len(), "fetch complete");
        all
    }

    /// Fetch one source by CLI name or full source name.
    pub async fn fetch_source(&self, name: &str) -> Result<Vec<Article>> {
        let needle = name.to_lowercase();
        let scraper = self
            .scrapers
            .iter()
            .find(|s| {
                s.metadata().name.to_lowercase() == needle
                    || s.cli_names().iter().any(|n| *n == needle)
            })
            .ok_or_else(|| Error::Scraping(format!("No scraper found for source: {}", name)))?;
        self.fetch_with_retry(scraper.as_ref()).await
    }

    async fn fetch_with_retry(&self, scraper: &dyn Scraper) -> Result<Vec<Article>> {
        let name = scraper.metadata().name;
        let mut last_error = None;

        for attempt in 1..=self.config.max_retries.max(1) {
            if attempt > 1 {
                sleep(self.config.delay_between_requests()).await;
            }
            match scraper
                .fetch(&self.client, self.config.max_articles_per_source)
                .await
            {
                Ok(articles) => return Ok(articles),
                Err(e) => {
                    warn!(
                        source = %name,
                        attempt,
                        retries = self.config.max_retries,
                        error = %e,
                        "fetch attempt failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::Scraping(format!("{}: no fetch attempts made", name))))
    }
}
