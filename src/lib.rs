//! shelfwatch - markdown-rack watcher for storefront listing pages
//!
//! Scrapes configured listing pages with TLS fingerprint emulation, keeps the
//! products that pass the audience, category and price filters, and sends one
//! Telegram message per run for products it has not reported before.

pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod notify;
pub mod pacing;
pub mod shop;
pub mod store;

pub use config::Config;
pub use shop::{ProductCandidate, Template};
pub use store::{SeenSet, SeenStore};
