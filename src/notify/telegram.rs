//! Telegram Bot API delivery.

use super::{NotifyError, Notifier};
use crate::config::TelegramConfig;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// `sendMessage` request body.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Sends messages through a Telegram bot.
pub struct TelegramNotifier {
    client: Client,
    bot_token: Option<String>,
    chat_id: Option<String>,
    api_base: String,
}

impl TelegramNotifier {
    /// Creates a notifier. Missing credentials make it a no-op.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone().filter(|t| !t.trim().is_empty()),
            chat_id: config.chat_id.clone().filter(|c| !c.trim().is_empty()),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let (Some(token), Some(chat_id)) = (self.bot_token.as_deref(), self.chat_id.as_deref())
        else {
            info!("Telegram not configured. Skipping notification.");
            return Ok(());
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let payload = serde_json::to_string(&SendMessage {
            chat_id,
            text: message,
            disable_web_page_preview: true,
        })?;

        let response = self
            .client
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status: status.as_u16(), body });
        }

        debug!("Telegram message delivered to chat {}", chat_id);
        Ok(())
    }
}
