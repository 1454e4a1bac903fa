use std::fmt;

use async_trait::async_trait;

use agd_core::{Article, Language, Result, Summarizer};

use super::ChatClient;

/// Summarizer backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiSummarizer {
    chat: ChatClient,
    language: Language,
}

impl OpenAiSummarizer {
    pub fn new(api_key: String, base_url: String, model: String, language: Language) -> Self {
        Self {
            chat: ChatClient::new(api_key, base_url, model),
            language,
        }
    }

    fn prompt(&self, article: &Article) -> String {
        match self.language {
            Language::Russian => format!(
                "Сделай краткое резюме новости аграрного рынка в 2-3 предложениях для дайджеста.\n\nЗаголовок: {}\n\nСодержание: {}",
                article.title, article.summary
            ),
            Language::English => format!(
                "Summarize the following agriculture market news in 2-3 sentences for a digest.\n\nTitle: {}\n\nContent: {}",
                article.title, article.summary
            ),
        }
    }
}

impl fmt::Debug for OpenAiSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSummarizer")
            .field("chat", &self.chat)
            .field("language", &self.language)
            .finish()
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        let summary = self.chat.complete(self.prompt(article)).await?;
        Ok(summary.trim().to_string())
    }
}
