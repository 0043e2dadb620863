//! Batched notifications for newly matching items.

pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::config::Config;
use crate::shop::ProductCandidate;
use async_trait::async_trait;
use thiserror::Error;

/// Delivery failures. Callers log these; nothing is retried.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    Transport(#[from] wreq::Error),

    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to encode notification: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Trait for message delivery - enables mocking for tests.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message. Unconfigured notifiers succeed without sending.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Layout of the batched message: a header line, then one entry per item.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFormat {
    pub title: String,
    pub ceiling: f64,
    pub currency: String,
    pub display_limit: usize,
}

impl MessageFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.title.clone(),
            ceiling: config.price_ceiling,
            currency: config.currency.clone(),
            display_limit: config.display_limit,
        }
    }

    /// Header with the full count, followed by at most `display_limit` entries.
    pub fn compose(&self, items: &[ProductCandidate]) -> String {
        let noun = if items.len() == 1 { "item" } else { "items" };
        let mut lines = vec![format!(
            "{} ≤ ${} - {} new {}",
            self.title,
            amount(self.ceiling),
            items.len(),
            noun
        )];

        lines.extend(items.iter().take(self.display_limit).map(|item| self.entry(item)));
        lines.join("\n")
    }

    fn entry(&self, item: &ProductCandidate) -> String {
        format!("• {} - {} ${:.2}\n{}", item.title, self.currency, item.price, item.url)
    }
}

/// Rounds to cents and drops trailing zeros (`40`, `39.5`).
fn amount(value: f64) -> String {
    let cents = format!("{:.2}", value);
    cents.trim_end_matches('0').trim_end_matches('.').to_string()
}
