use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{error, info, warn};

use agd_core::{Error, Result};

use crate::service::DigestService;

const API_BASE: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 25;

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct BotInfo {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Leading bot command of a message, with any `@BotName` suffix removed.
fn parse_command(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    first.split('@').next()
}

/// Minimal Telegram Bot API client plus the long-polling command loop.
pub struct TelegramBot {
    client: Client,
    token: String,
    channel_id: String,
    service: Arc<DigestService>,
}

impl TelegramBot {
    pub fn new(token: String, channel_id: String, service: Arc<DigestService>) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::Config("telegram bot token is empty".to_string()));
        }
        let client = Client::builder()
            // Must outlive the long-poll window.
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()?;
        Ok(Self {
            client,
            token,
            channel_id,
            service,
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?.json::<ApiResponse<T>>().await?;
        if !response.ok {
            return Err(Error::Telegram(format!(
                "{} failed: {}",
                method,
                response.description.unwrap_or_else(|| "unknown error".to_string())
            )));
        }
        response
            .result
            .ok_or_else(|| Error::Telegram(format!("{} returned no result", method)))
    }

    pub async fn get_me(&self) -> Result<BotInfo> {
        self.call("getMe", self.client.get(self.api_url("getMe"))).await
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };
        self.call::<serde_json::Value>(
            "sendMessage",
            self.client.post(self.api_url("sendMessage")).json(&request),
        )
        .await?;
        Ok(())
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let request = self
            .client
            .get(self.api_url("getUpdates"))
            .query(&[("offset", offset), ("timeout", POLL_TIMEOUT_SECS as i64)]);
        self.call("getUpdates", request).await
    }

    /// Generate the digest and deliver it to the configured channel.
    pub async fn send_digest_to_channel(&self) -> Result<()> {
        let message = self.service.generate_message().await;
        self.send_message(&self.channel_id, &message).await?;
        info!(channel = %self.channel_id, "digest delivered");
        Ok(())
    }

    /// Long-polling command loop. Errors on individual updates are logged and
    /// polling continues.
    pub async fn run(&self) -> Result<()> {
        let me = self.get_me().await?;
        info!(
            bot = %me.first_name,
            username = me.username.as_deref().unwrap_or("-"),
            "telegram bot started"
        );

        let mut offset = 0i64;
        loop {
            match self.get_updates(offset).await {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        if let Err(e) = self.handle_update(update).await {
                            warn!(error = %e, "failed to handle update");
                        }
                    }
                }
                Err(e) => {
                    error!(error = %e, "getUpdates failed, backing off");
                    sleep(Duration::from_secs(5)).await;
                }
            }
        }
    }

    async fn handle_update(&self, update: Update) -> Result<()> {
        let message = match update.message {
            Some(message) => message,
            None => return Ok(()),
        };
        let text = match message.text.as_deref() {
            Some(text) => text,
            None => return Ok(()),
        };
        let chat_id = message.chat.id.to_string();

        match parse_command(text) {
            Some("/start") => self.send_message(&chat_id, WELCOME_TEXT).await,
            Some("/help") => self.send_message(&chat_id, HELP_TEXT).await,
            Some("/status") => {
                let status = self.status_text();
                self.send_message(&chat_id, &status).await
            }
            Some("/digest") => {
                self.send_message(&chat_id, "🔄 Generating agriculture digest...")
                    .await?;
                let digest = self.service.generate_message().await;
                self.send_message(&chat_id, &digest).await
            }
            _ => Ok(()),
        }
    }

    fn status_text(&self) -> String {
        let sources: Vec<String> = self
            .service
            .sources()
            .into_iter()
            .map(|metadata| metadata.name)
            .collect();
        format!(
            "🤖 **Bot Status**\n\n• Channel: {}\n• Language: {}\n• Sources ({}): {}\n\n✅ Active and monitoring agriculture news sources",
            self.channel_id,
            self.service.language().code(),
            sources.len(),
            sources.join(", "),
        )
    }
}

const WELCOME_TEXT: &str = "🌾 **Welcome to Agro Digest!**\n\n\
This bot provides daily agriculture market news and insights.\n\n\
**Available Commands:**\n\
/start - Show this welcome message\n\
/digest - Generate and send the current digest\n\
/help - Show help information\n\
/status - Show bot status\n\n\
Daily digests are delivered automatically to the configured channel.";

const HELP_TEXT: &str = "📖 **Agro Digest Help**\n\n\
**Commands:**\n\
• `/start` - Welcome message\n\
• `/digest` - Manually generate the current digest\n\
• `/help` - This help message\n\
• `/status` - Bot status and configuration\n\n\
**How it works:**\n\
1. The bot fetches agriculture news from the configured sources\n\
2. Filters and ranks articles by relevance\n\
3. Groups articles by topic\n\
4. Renders a digest with summaries and links\n\
5. Delivers the digest to the Telegram channel";
