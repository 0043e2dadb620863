//! Storefront catalog grids, where product links follow the `/p/` convention.

use super::{
    attr, body_text, document_text, non_blank, select_text, sweep_product_links, text_of,
    Extractor,
};
use crate::shop::models::RawTile;
use crate::shop::selectors::{catalog, page};
use scraper::Html;
use tracing::trace;

/// Extractor for catalog listing pages.
#[derive(Debug, Clone, Default)]
pub struct CatalogExtractor {
    /// Replaces the page-derived breadcrumb when set.
    breadcrumb: Option<String>,
}

impl CatalogExtractor {
    pub fn new(breadcrumb: Option<String>) -> Self {
        Self { breadcrumb }
    }
}

impl Extractor for CatalogExtractor {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn primary(&self, document: &Html) -> Vec<RawTile> {
        // Page-level breadcrumb, shared by every tile.
        let breadcrumb =
            self.breadcrumb.clone().unwrap_or_else(|| document_text(document, &catalog::BREADCRUMB));

        let mut tiles = Vec::new();

        for container in document.select(&catalog::TILE) {
            let Some(anchor) = container.select(&page::ANCHOR).next() else {
                continue;
            };

            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            if !href.contains(catalog::PRODUCT_PATH) {
                continue;
            }

            let title = attr(anchor, "aria-label")
                .or_else(|| container.select(&catalog::TITLED).next().and_then(|e| attr(e, "title")))
                .or_else(|| non_blank(text_of(anchor)));

            let Some(title) = title else {
                trace!("Skipping untitled tile: {}", href);
                continue;
            };

            let price_text = non_blank(select_text(container, &catalog::PRICE))
                .unwrap_or_else(|| text_of(container));

            tiles.push(RawTile {
                title,
                href: href.to_string(),
                price_text,
                breadcrumb: breadcrumb.clone(),
            });
        }

        tiles
    }

    fn fallback(&self, document: &Html) -> Vec<RawTile> {
        let breadcrumb = self.breadcrumb.clone().unwrap_or_else(|| body_text(document));
        sweep_product_links(document, &catalog::PRODUCT_LINK, &breadcrumb)
    }
}
