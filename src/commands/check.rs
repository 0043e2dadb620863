//! Offline extraction check against a saved listing page.

use crate::config::Config;
use crate::format::Formatter;
use crate::shop::{Classifier, Template};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use url::Url;

/// Runs an extractor over a local HTML file.
pub struct CheckCommand {
    config: Config,
    classifier: Classifier,
}

impl CheckCommand {
    pub fn new(config: Config) -> Result<Self> {
        let classifier = Classifier::new(&config.exclusions[..], &config.audience_markers[..])
            .context("Invalid classification vocabulary")?;

        Ok(Self { config, classifier })
    }

    /// Extracts candidates from `path` as if it had been fetched from `base_url`.
    pub fn execute(
        &self,
        path: &Path,
        base_url: &str,
        template: Option<Template>,
        breadcrumb: Option<String>,
    ) -> Result<String> {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;

        let template = template.unwrap_or_else(|| Template::detect(&base_url));
        info!("Checking {} as {} page", path.display(), template);

        let candidates = template.extractor(breadcrumb).extract(&html, &base_url, &self.classifier);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_candidates(&candidates))
    }
}
