//! Audience and category classification from tile text and URL.
//!
//! Breadcrumbs tend to carry the audience signal (titles are often phrased
//! unisex) while titles carry the accessory vocabulary, so both are matched
//! as one blob.

use crate::shop::models::Facets;
use anyhow::{Context, Result};
use regex_lite::Regex;
use url::Url;

/// Default exclusion vocabulary: apparel accessories.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "accessory",
    "accessories",
    "belt",
    "bag",
    "sling",
    "crossbody",
    "duffle",
    "backpack",
    "tote",
    "sock",
    "beanie",
    "hat",
    "cap",
    "visor",
    "glove",
    "mitt",
    "scarf",
    "balaclava",
    "wrap",
    "keychain",
    "bottle",
    "water bottle",
    "wallet",
    "cardholder",
    "strap",
    "phone case",
    "armpocket",
    "arm band",
    "yoga mat",
    "mat",
];

/// Default audience markers.
pub const DEFAULT_AUDIENCE_MARKERS: &[&str] = &["men"];

/// Compiled exclusion and audience vocabularies.
#[derive(Debug, Clone)]
pub struct Classifier {
    exclusion: Option<Regex>,
    audience_text: Option<Regex>,
    audience_path: Option<Regex>,
}

impl Classifier {
    /// Compiles the vocabularies. Terms match whole words, case-insensitively.
    pub fn new<S: AsRef<str>>(exclusions: &[S], audience_markers: &[S]) -> Result<Self> {
        let exclusion = alternation(exclusions)
            .map(|alt| Regex::new(&format!(r"(?i)\b(?:{})(?:e?s)?\b", alt)))
            .transpose()
            .context("Invalid exclusion vocabulary")?;

        let audience = alternation(audience_markers);
        let audience_text = audience
            .as_deref()
            .map(|alt| Regex::new(&format!(r"(?i)\b(?:{})\b", alt)))
            .transpose()
            .context("Invalid audience vocabulary")?;
        let audience_path = audience
            .as_deref()
            .map(|alt| Regex::new(&format!(r"(?i)/(?:{})[-/]", alt)))
            .transpose()
            .context("Invalid audience vocabulary")?;

        Ok(Self { exclusion, audience_text, audience_path })
    }

    /// True if the blob mentions an excluded category.
    pub fn is_accessory(&self, blob: &str) -> bool {
        self.exclusion.as_ref().is_some_and(|re| re.is_match(blob))
    }

    /// True if the blob names the audience or the URL path has an audience segment.
    pub fn is_target_audience(&self, blob: &str, url: &str) -> bool {
        if self.audience_text.as_ref().is_some_and(|re| re.is_match(blob)) {
            return true;
        }

        let path = Url::parse(url).map(|u| u.path().to_string()).unwrap_or_else(|_| url.to_string());
        self.audience_path.as_ref().is_some_and(|re| re.is_match(&path))
    }

    /// Classifies a tile from its breadcrumb, title and URL.
    pub fn classify(&self, breadcrumb: &str, title: &str, url: &str) -> Facets {
        let blob = format!("{} {}", breadcrumb, title);
        Facets {
            is_accessory: self.is_accessory(&blob),
            is_target_audience: self.is_target_audience(&blob, url),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        // The built-in vocabularies are plain words and always compile.
        Self::new(DEFAULT_EXCLUSIONS, DEFAULT_AUDIENCE_MARKERS)
            .expect("default vocabularies are valid")
    }
}

/// Builds `a|b\s+c|...` from the terms; None when no usable term is given.
fn alternation<S: AsRef<str>>(terms: &[S]) -> Option<String> {
    let parts: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().split_whitespace().map(regex_lite::escape).collect::<Vec<_>>())
        .filter(|words| !words.is_empty())
        .map(|words| words.join(r"\s+"))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}
