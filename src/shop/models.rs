//! Data models for scraped product tiles.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A product tile scraped from a listing page, classified but not yet filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCandidate {
    /// Display title
    pub title: String,
    /// Absolute product URL, the identity key
    pub url: String,
    /// Listed price in the site's currency
    pub price: f64,
    /// Text used only for classification
    pub breadcrumb_text: String,
    /// Matched the exclusion vocabulary
    pub is_accessory: bool,
    /// Matched an audience marker in text or URL
    pub is_target_audience: bool,
}

/// Facets derived by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facets {
    pub is_accessory: bool,
    pub is_target_audience: bool,
}

/// A tile as found in the markup, before price parsing and URL resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTile {
    pub title: String,
    pub href: String,
    pub price_text: String,
    pub breadcrumb: String,
}

/// Drops later candidates whose URL was already seen. First occurrence wins.
pub fn dedup_by_url(candidates: Vec<ProductCandidate>) -> Vec<ProductCandidate> {
    let mut seen = HashSet::new();
    candidates.into_iter().filter(|c| seen.insert(c.url.clone())).collect()
}
