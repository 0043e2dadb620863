//! Template extractors: markup-to-candidate translators, one per site family.
//!
//! Every extractor has a primary strategy tuned to its template and a looser
//! fallback sweep that only runs when the primary strategy produces nothing.

pub mod catalog;
pub mod resale;

pub use catalog::CatalogExtractor;
pub use resale::ResaleExtractor;

use crate::shop::classifier::Classifier;
use crate::shop::models::{dedup_by_url, ProductCandidate, RawTile};
use crate::shop::price::parse_price;
use crate::shop::selectors::page;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

/// A site-family-specific extraction capability.
pub trait Extractor: Send + Sync {
    /// Short template name for logs.
    fn name(&self) -> &'static str;

    /// Template-aware scan of tile containers.
    fn primary(&self, document: &Html) -> Vec<RawTile>;

    /// Loose sweep of product anchors regardless of container shape.
    fn fallback(&self, document: &Html) -> Vec<RawTile>;

    /// Extracts classified, URL-unique candidates from a listing page.
    fn extract(&self, html: &str, base_url: &Url, classifier: &Classifier) -> Vec<ProductCandidate> {
        let document = Html::parse_document(html);

        let mut candidates = build_candidates(self.primary(&document), base_url, classifier);
        if candidates.is_empty() {
            debug!("{}: primary strategy found no tiles, sweeping product links", self.name());
            candidates = build_candidates(self.fallback(&document), base_url, classifier);
        }

        let candidates = dedup_by_url(candidates);
        debug!("{}: extracted {} candidates from {}", self.name(), candidates.len(), base_url);
        candidates
    }
}

/// Known listing templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Storefront catalog grid with `/p/` product links.
    Catalog,
    /// Resale collection grid with `/products/` product links.
    Resale,
}

impl Template {
    /// Guesses the template from a listing URL.
    pub fn detect(url: &Url) -> Self {
        let host = url.host_str().unwrap_or_default();
        if host.starts_with("likenew.") || url.path().starts_with("/collections/") {
            Template::Resale
        } else {
            Template::Catalog
        }
    }

    /// Builds the extractor for this template.
    pub fn extractor(&self, breadcrumb: Option<String>) -> Box<dyn Extractor> {
        match self {
            Template::Catalog => Box::new(CatalogExtractor::new(breadcrumb)),
            Template::Resale => Box::new(ResaleExtractor::new(breadcrumb)),
        }
    }
}

impl std::str::FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "catalog" => Ok(Template::Catalog),
            "resale" => Ok(Template::Resale),
            _ => Err(format!("Unknown template: {}. Use: catalog, resale", s)),
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Catalog => write!(f, "catalog"),
            Template::Resale => write!(f, "resale"),
        }
    }
}

/// Turns raw tiles into candidates, dropping tiles without title, price or link.
fn build_candidates(
    tiles: Vec<RawTile>,
    base_url: &Url,
    classifier: &Classifier,
) -> Vec<ProductCandidate> {
    tiles.into_iter().filter_map(|tile| build_candidate(tile, base_url, classifier)).collect()
}

fn build_candidate(tile: RawTile, base_url: &Url, classifier: &Classifier) -> Option<ProductCandidate> {
    let title = collapse_whitespace(&tile.title);
    if title.is_empty() {
        trace!("Skipping tile without title: {}", tile.href);
        return None;
    }

    let Some(price) = parse_price(&tile.price_text) else {
        trace!("Skipping tile without price: {}", title);
        return None;
    };

    let url = resolve_url(base_url, &tile.href)?;
    let facets = classifier.classify(&tile.breadcrumb, &title, &url);

    trace!("Tile: {} ${:.2} {}", title, price, url);

    Some(ProductCandidate {
        title,
        url,
        price,
        breadcrumb_text: tile.breadcrumb,
        is_accessory: facets.is_accessory,
        is_target_audience: facets.is_target_audience,
    })
}

/// Resolves a possibly relative link against the page URL, without fragment.
pub(crate) fn resolve_url(base_url: &Url, href: &str) -> Option<String> {
    let mut url = base_url.join(href.trim()).ok()?;
    url.set_fragment(None);
    Some(url.to_string())
}

/// Concatenated text of an element and its descendants.
pub(crate) fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// Concatenated text of every descendant of `scope` matching `selector`.
pub(crate) fn select_text(scope: ElementRef, selector: &Selector) -> String {
    scope.select(selector).map(text_of).collect()
}

/// Concatenated text of every element in the document matching `selector`.
pub(crate) fn document_text(document: &Html, selector: &Selector) -> String {
    document.select(selector).map(text_of).collect()
}

/// A non-blank attribute value.
pub(crate) fn attr(element: ElementRef, name: &str) -> Option<String> {
    element.value().attr(name).and_then(|v| non_blank(v.to_string()))
}

pub(crate) fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Closest enclosing tile-like element of an anchor.
pub(crate) fn nearest_container(element: ElementRef) -> Option<ElementRef> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| page::CONTAINER_TAGS.contains(&e.value().name()))
}

/// Fallback sweep shared by all templates: every matching anchor becomes a tile,
/// priced from its nearest container.
pub(crate) fn sweep_product_links(
    document: &Html,
    links: &Selector,
    breadcrumb: &str,
) -> Vec<RawTile> {
    document
        .select(links)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let title = attr(anchor, "aria-label")
                .or_else(|| non_blank(text_of(anchor)))
                .unwrap_or_else(|| "Item".to_string());
            let price_text = nearest_container(anchor).map(text_of).unwrap_or_default();

            Some(RawTile {
                title,
                href: href.to_string(),
                price_text,
                breadcrumb: breadcrumb.to_string(),
            })
        })
        .collect()
}

/// Whole page text, the widest possible classification blob.
pub(crate) fn body_text(document: &Html) -> String {
    document.select(&page::BODY).next().map(text_of).unwrap_or_default()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
