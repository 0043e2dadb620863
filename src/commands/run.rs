//! Run command: one scrape, diff and notify cycle over every configured source.

use crate::config::{Config, Source};
use crate::filters::{FilterChain, FilterChainBuilder};
use crate::notify::{MessageFormat, Notifier, TelegramNotifier};
use crate::pacing::Pacing;
use crate::shop::{Classifier, PageFetch, ProductCandidate, ShopClient};
use crate::store::SeenStore;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// A source that could not be scraped this run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFailure {
    pub url: String,
    pub message: String,
}

/// Summary of one run. Never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub sources_attempted: usize,
    pub failures: Vec<SourceFailure>,
    /// Candidates extracted across all sources, before filtering.
    pub scraped: usize,
    /// Candidates left after filtering and cross-source dedup.
    pub matches: usize,
    pub new_items: Vec<ProductCandidate>,
    pub notified: bool,
    pub persisted: bool,
}

impl RunReport {
    pub fn is_idle(&self) -> bool {
        self.new_items.is_empty()
    }
}

/// Executes a scrape run.
pub struct RunCommand {
    config: Config,
    classifier: Classifier,
    filters: FilterChain,
    store: SeenStore,
    pacing: Pacing,
    message: MessageFormat,
    dry_run: bool,
}

impl RunCommand {
    /// Creates a run command. Fails on an invalid ceiling or vocabulary.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let classifier = Classifier::new(&config.exclusions[..], &config.audience_markers[..])
            .context("Invalid classification vocabulary")?;

        let filters = FilterChainBuilder::new()
            .target_audience(true)
            .exclude_accessories(true)
            .price_ceiling(Some(config.price_ceiling))
            .build();

        Ok(Self {
            store: SeenStore::new(&config.state_file),
            pacing: Pacing::new(config.delay_ms, config.delay_jitter_ms),
            message: MessageFormat::from_config(&config),
            classifier,
            filters,
            config,
            dry_run: false,
        })
    }

    /// Skips notification and persistence.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs against the live storefront and Telegram.
    pub async fn execute(&self) -> Result<RunReport> {
        let client = ShopClient::new(&self.config).context("Failed to create HTTP client")?;
        let notifier =
            TelegramNotifier::new(&self.config.telegram).context("Failed to create notifier")?;

        self.execute_with(&client, &notifier).await
    }

    /// Runs with the provided fetcher and notifier (for testing).
    pub async fn execute_with(
        &self,
        fetcher: &impl PageFetch,
        notifier: &impl Notifier,
    ) -> Result<RunReport> {
        let mut report = RunReport::default();

        let mut seen = self.store.load();
        if !self.filters.is_empty() {
            debug!("Active filters: {}", self.filters.descriptions().join(", "));
        }

        let mut scraped = Vec::new();
        for (index, source) in self.config.sources.iter().enumerate() {
            if index > 0 {
                self.pacing.pause().await;
            }

            report.sources_attempted += 1;
            match self.scrape_source(fetcher, source).await {
                Ok(candidates) => {
                    debug!("{} candidates from {}", candidates.len(), source.url);
                    scraped.extend(candidates);
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", source.url, e);
                    report.failures.push(SourceFailure {
                        url: source.url.clone(),
                        message: format!("{:#}", e),
                    });
                }
            }
        }

        report.scraped = scraped.len();
        let matches = self.filters.aggregate(scraped);
        report.matches = matches.len();

        let (_, new_items) = seen.partition(matches);
        info!(
            "Scraped {} candidates, {} matches, {} new",
            report.scraped,
            report.matches,
            new_items.len()
        );

        if new_items.is_empty() {
            info!("No new matches this run.");
            return Ok(report);
        }

        report.new_items = new_items;

        if self.dry_run {
            info!("Dry run: skipping notification and state update");
            return Ok(report);
        }

        let message = self.message.compose(&report.new_items);
        match notifier.notify(&message).await {
            Ok(()) => report.notified = true,
            Err(e) => error!("Notification failed: {}", e),
        }

        seen.extend(report.new_items.iter().map(|c| c.url.clone()));
        self.store.persist(&seen)?;
        report.persisted = true;

        Ok(report)
    }

    async fn scrape_source(
        &self,
        fetcher: &impl PageFetch,
        source: &Source,
    ) -> Result<Vec<ProductCandidate>> {
        let url = source.parsed_url()?;
        let template = source.resolved_template(&url);
        debug!("Scraping {} as {}", url, template);

        let html = fetcher.fetch(url.as_str()).await?;
        let extractor = template.extractor(source.breadcrumb.clone());

        Ok(extractor.extract(&html, &url, &self.classifier))
    }
}
