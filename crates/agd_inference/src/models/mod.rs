use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use agd_core::{Error, Language, Result, Summarizer};

pub mod openai;
pub mod ranker;

pub use openai::OpenAiSummarizer;
pub use ranker::ModelRanker;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_name: String,
    pub language: Language,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model_name: "gpt-4o-mini".to_string(),
            language: Language::default(),
        }
    }
}

/// Shared chat-completions plumbing for the summarizer and the model ranker.
pub(crate) struct ChatClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub(crate) fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url,
            model,
        }
    }

    pub(crate) async fn complete(&self, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Inference("empty completion response".to_string()))
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Build the summarizer when an API key is configured; `None` means the
/// digest runs without AI summaries.
pub fn create_summarizer(config: &InferenceConfig) -> Option<Arc<dyn Summarizer>> {
    let api_key = config.api_key.as_deref().filter(|k| !k.is_empty())?;
    Some(Arc::new(OpenAiSummarizer::new(
        api_key.to_string(),
        config.base_url.clone(),
        config.model_name.clone(),
        config.language,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_api_key_means_no_summarizer() {
        assert!(create_summarizer(&InferenceConfig::default()).is_none());

        let blank = InferenceConfig {
            api_key: Some(String::new()),
            ..InferenceConfig::default()
        };
        assert!(create_summarizer(&blank).is_none());
    }

    #[test]
    fn api_key_enables_the_summarizer() {
        let config = InferenceConfig {
            api_key: Some("sk-test".to_string()),
            ..InferenceConfig::default()
        };
        let summarizer = create_summarizer(&config).unwrap();
        assert_eq!(summarizer.name(), "openai");
    }

    #[test]
    fn chat_client_debug_redacts_the_key() {
        let chat = ChatClient::new(
            "sk-secret".to_string(),
            "https://api.openai.com/v1".to_string(),
            "gpt-4o-mini".to_string(),
        );
        let rendered = format!("{:?}", chat);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
