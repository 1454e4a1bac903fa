use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use agd_core::{Article, Error, RankStrategy, Result};

use super::ChatClient;

/// Ranking strategy that asks the chat model for an importance ordering and
/// maps the returned indices back onto the input. Anything the model invents
/// (bad JSON, out-of-range or duplicate indices) is a typed error so the
/// pipeline can fall back and log it.
pub struct ModelRanker {
    chat: ChatClient,
    max_articles: usize,
}

impl ModelRanker {
    pub fn new(api_key: String, base_url: String, model: String, max_articles: usize) -> Self {
        Self {
            chat: ChatClient::new(api_key, base_url, model),
            max_articles,
        }
    }
}

impl fmt::Debug for ModelRanker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRanker")
            .field("chat", &self.chat)
            .field("max_articles", &self.max_articles)
            .finish()
    }
}

/// Pull the first JSON array out of a chat reply.
fn parse_indices(reply: &str) -> Result<Vec<usize>> {
    let start = reply
        .find('[')
        .ok_or_else(|| Error::Inference("no JSON array in ranking reply".to_string()))?;
    let end = reply
        .rfind(']')
        .ok_or_else(|| Error::Inference("unterminated JSON array in ranking reply".to_string()))?;
    if end < start {
        return Err(Error::Inference("malformed JSON array in ranking reply".to_string()));
    }
    serde_json::from_str(&reply[start..=end])
        .map_err(|e| Error::Inference(format!("unparseable ranking reply: {}", e)))
}

#[async_trait]
impl RankStrategy for ModelRanker {
    fn name(&self) -> &str {
        "model"
    }

    async fn rank(&self, articles: &[Article]) -> Result<Vec<Article>> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let listing = articles
            .iter()
            .enumerate()
            .map(|(index, article)| format!("{}. {} ({})", index, article.title, article.source))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Rank the following agriculture market news items by importance to traders and \
             producers. Reply with ONLY a JSON array of item indices, most important first.\n\n{}",
            listing
        );

        let reply = self.chat.complete(prompt).await?;
        debug!(reply = %reply, "model ranking reply");
        let indices = parse_indices(&reply)?;

        let mut seen = vec![false; articles.len()];
        let mut ranked = Vec::new();
        for index in indices {
            if index >= articles.len() || seen[index] {
                continue;
            }
            seen[index] = true;
            ranked.push(articles[index].clone());
            if ranked.len() >= self.max_articles {
                break;
            }
        }

        if ranked.is_empty() {
            return Err(Error::Inference("ranking reply had no usable indices".to_string()));
        }
        Ok(ranked)
    }
}
