//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::shop::classifier::{DEFAULT_AUDIENCE_MARKERS, DEFAULT_EXCLUSIONS};
use crate::shop::Template;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum price, inclusive, for a notification
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Currency label shown in messages
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Label at the start of the notification header
    #[serde(default = "default_title")]
    pub title: String,

    /// Path of the seen-set JSON file
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Base delay between source requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Maximum number of items listed in one message
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Accept-Language header sent with page requests
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format for CLI listings
    #[serde(default)]
    pub format: OutputFormat,

    /// Terms marking a product as an excluded category
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<String>,

    /// Terms marking a product as aimed at the target audience
    #[serde(default = "default_audience_markers")]
    pub audience_markers: Vec<String>,

    /// Telegram delivery settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Listing pages to scrape, in order
    #[serde(default = "default_sources")]
    pub sources: Vec<Source>,
}

/// Telegram bot credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: Option<String>,

    #[serde(default)]
    pub chat_id: Option<String>,

    #[serde(default = "default_telegram_api")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self { bot_token: None, chat_id: None, api_base: default_telegram_api() }
    }
}

/// A listing page to scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,

    /// Template override; detected from the URL when absent
    #[serde(default)]
    pub template: Option<Template>,

    /// Classification text used for every tile instead of the page's own
    #[serde(default)]
    pub breadcrumb: Option<String>,
}

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), template: None, breadcrumb: None }
    }

    /// Parses the source URL.
    pub fn parsed_url(&self) -> Result<Url> {
        Url::parse(&self.url).with_context(|| format!("Invalid source URL: {}", self.url))
    }

    /// The configured template, or the one detected from the URL.
    pub fn resolved_template(&self, url: &Url) -> Template {
        self.template.unwrap_or_else(|| Template::detect(url))
    }
}

fn default_price_ceiling() -> f64 {
    40.0
}

fn default_currency() -> String {
    "CAD".to_string()
}

fn default_title() -> String {
    "Lululemon Men".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("seen.json")
}

fn default_delay_ms() -> u64 {
    1200
}

fn default_delay_jitter_ms() -> u64 {
    400
}

fn default_display_limit() -> usize {
    30
}

fn default_accept_language() -> String {
    "en-CA,en;q=0.9".to_string()
}

fn default_exclusions() -> Vec<String> {
    DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_audience_markers() -> Vec<String> {
    DEFAULT_AUDIENCE_MARKERS.iter().map(|s| s.to_string()).collect()
}

fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}

/// Ceilings must be finite and non-negative.
fn is_valid_ceiling(ceiling: f64) -> bool {
    ceiling.is_finite() && ceiling >= 0.0
}

fn default_sources() -> Vec<Source> {
    vec![
        // Men's We Made Too Much
        Source::new("https://shop.lululemon.com/en-ca/c/men-we-made-too-much/n18mhdznrqw"),
        // Men's We Made Too Much under $50
        Source::new("https://shop.lululemon.com/en-ca/c/men-we-made-too-much/n11odkz8mhdznrqw"),
        // All We Made Too Much under $50, narrowed to men by the filters
        Source::new("https://shop.lululemon.com/c/we-made-too-much/n11odkz8mhd"),
        Source {
            url: "https://likenew.lululemon.com/collections/men-finds-under-50".to_string(),
            template: Some(Template::Resale),
            breadcrumb: Some("Like New • Men".to_string()),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_ceiling: default_price_ceiling(),
            currency: default_currency(),
            title: default_title(),
            state_file: default_state_file(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            display_limit: default_display_limit(),
            accept_language: default_accept_language(),
            proxy: None,
            format: OutputFormat::Table,
            exclusions: default_exclusions(),
            audience_markers: default_audience_markers(),
            telegram: TelegramConfig::default(),
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Checks values serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_ceiling(self.price_ceiling) {
            anyhow::bail!(
                "price_ceiling must be a finite, non-negative amount (got {})",
                self.price_ceiling
            );
        }
        Ok(())
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("shelfwatch").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparsable or out-of-range values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(limit) = std::env::var("PRICE_LIMIT") {
            match limit.parse::<f64>() {
                Ok(l) if is_valid_ceiling(l) => self.price_ceiling = l,
                _ => warn!("Ignoring invalid PRICE_LIMIT: {}", limit),
            }
        }

        if let Ok(currency) = std::env::var("CURRENCY") {
            if !currency.trim().is_empty() {
                self.currency = currency;
            }
        }

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }

        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = Some(chat_id);
        }

        if let Ok(state) = std::env::var("SHELFWATCH_STATE") {
            self.state_file = PathBuf::from(state);
        }

        if let Ok(proxy) = std::env::var("SHELFWATCH_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("SHELFWATCH_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }
}

/// Output format for CLI listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
