use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use agd_core::{Article, DigestConfig, Language, Summarizer};

/// Renders ranked (and optionally categorized) articles into the final digest
/// text. Missing optional data degrades by omitting the corresponding line;
/// nothing is ever fabricated in place of a real summarization call.
pub struct DigestFormatter {
    config: DigestConfig,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl DigestFormatter {
    pub fn new(config: DigestConfig) -> Self {
        Self {
            config,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub async fn format(&self, articles: &[Article]) -> String {
        let mut digest = self.header(articles);
        digest.push_str(&self.overview(articles));
        digest.push_str(&self.top_news_heading());

        for (index, article) in articles.iter().take(self.config.top_news_limit).enumerate() {
            digest.push_str(&self.entry(index + 1, article).await);
        }

        digest.push_str(self.footer());
        digest
    }

    fn header(&self, articles: &[Article]) -> String {
        let sources: HashSet<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        let now = Utc::now();
        match self.config.language {
            Language::Russian => format!(
                "🌾 Дайджест сельскохозяйственного рынка - {}\n\n📊 **{} статей** из {} источников\n\n",
                now.format("%d.%m.%Y"),
                articles.len(),
                sources.len(),
            ),
            Language::English => format!(
                "🌾 Agriculture Market Digest - {}\n\n📊 **{} articles** from {} sources\n\n",
                now.format("%B %d, %Y"),
                articles.len(),
                sources.len(),
            ),
        }
    }

    /// Key-developments block built from the categories stamped upstream.
    /// Skipped entirely when no article carries a category.
    fn overview(&self, articles: &[Article]) -> String {
        let mut labels: Vec<&str> = Vec::new();
        for article in articles {
            if let Some(category) = article.category.as_deref() {
                if !labels.contains(&category) {
                    labels.push(category);
                }
            }
        }
        if labels.is_empty() {
            return String::new();
        }

        let heading = match self.config.language {
            Language::Russian => "📈 **Ключевые события дня:**\n",
            Language::English => "📈 **Key Market Developments:**\n",
        };
        let mut block = heading.to_string();
        for label in labels.iter().take(3) {
            block.push_str(&format!("• {}\n", label));
        }
        block.push('\n');
        block
    }

    fn top_news_heading(&self) -> &'static str {
        match self.config.language {
            Language::Russian => "📰 **Основные новости:**\n\n",
            Language::English => "📰 **Top News:**\n\n",
        }
    }

    async fn entry(&self, position: usize, article: &Article) -> String {
        let mut entry = format!("**{}. {}**\n", position, self.truncate_title(&article.title));

        if let Some(summary) = self.summary_for(article).await {
            entry.push_str(&summary);
            entry.push('\n');
        }

        match self.config.language {
            Language::Russian => entry.push_str(&format!("📰 Источник: {}\n", article.source)),
            Language::English => entry.push_str(&format!("📰 Source: {}\n", article.source)),
        }

        if self.config.include_source_links {
            if let Some(link) = article.link.as_deref().filter(|l| !l.is_empty()) {
                match self.config.language {
                    Language::Russian => {
                        entry.push_str(&format!("🔗 [Читать полностью]({})\n", link))
                    }
                    Language::English => entry.push_str(&format!("🔗 [Read more]({})\n", link)),
                }
            }
        }

        entry.push('\n');
        entry
    }

    /// A usable AI summary: a pre-stamped `ai_summary`, else one call to the
    /// configured summarizer bounded by the per-article timeout. Anything
    /// shorter than `min_summary_len` counts as unavailable.
    async fn summary_for(&self, article: &Article) -> Option<String> {
        if let Some(cached) = article.ai_summary.as_deref() {
            return self.accept(cached);
        }

        let summarizer = self.summarizer.as_ref()?;
        match tokio::time::timeout(
            self.config.summary_timeout(),
            summarizer.summarize_article(article),
        )
        .await
        {
            Ok(Ok(text)) => self.accept(&text),
            Ok(Err(e)) => {
                warn!(summarizer = summarizer.name(), error = %e, "summarization failed");
                None
            }
            Err(_) => {
                warn!(
                    summarizer = summarizer.name(),
                    timeout_secs = self.config.summary_timeout_secs,
                    "summarization timed out"
                );
                None
            }
        }
    }

    fn accept(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.chars().count() >= self.config.min_summary_len {
            Some(text.to_string())
        } else {
            debug!("discarding too-short summary ({} chars)", text.chars().count());
            None
        }
    }

    fn truncate_title(&self, title: &str) -> String {
        if title.chars().count() > self.config.max_title_len {
            let kept: String = title
                .chars()
                .take(self.config.max_title_len.saturating_sub(3))
                .collect();
            format!("{}...", kept)
        } else {
            title.to_string()
        }
    }

    fn footer(&self) -> &'static str {
        match self.config.language {
            Language::Russian => {
                "---\n🤖 Создано ботом Agro Digest\n📅 Обновляется ежедневно последними новостями аграрного рынка"
            }
            Language::English => {
                "---\n🤖 Generated by Agro Digest\n📅 Updated daily with the latest agriculture market news"
            }
        }
    }
}
