//! Resale collection grids, where product links follow the `/products/` convention.
//!
//! The primary strategy only reads anchors inside product cards. Bare
//! `/products/` anchors outside any card are picked up by the fallback sweep,
//! which runs only when no card yields a candidate.

use super::{
    attr, body_text, document_text, non_blank, select_text, sweep_product_links, text_of,
    Extractor,
};
use crate::shop::models::RawTile;
use crate::shop::selectors::{page, resale};
use scraper::Html;

/// Extractor for resale collection pages.
#[derive(Debug, Clone, Default)]
pub struct ResaleExtractor {
    /// Replaces the page-derived breadcrumb when set.
    breadcrumb: Option<String>,
}

impl ResaleExtractor {
    pub fn new(breadcrumb: Option<String>) -> Self {
        Self { breadcrumb }
    }
}

impl Extractor for ResaleExtractor {
    fn name(&self) -> &'static str {
        "resale"
    }

    fn primary(&self, document: &Html) -> Vec<RawTile> {
        let breadcrumb =
            self.breadcrumb.clone().unwrap_or_else(|| document_text(document, &page::NAVIGATION));

        document
            .select(&resale::CARD)
            .filter_map(|card| {
                let anchor = if card.value().name() == "a" {
                    card
                } else {
                    card.select(&page::ANCHOR).next()?
                };

                let href = anchor.value().attr("href")?;
                if !href.contains(resale::PRODUCT_PATH) {
                    return None;
                }

                let title = attr(anchor, "title")
                    .or_else(|| non_blank(select_text(card, &resale::TITLE)))
                    .or_else(|| non_blank(text_of(anchor)))?;

                let price_text =
                    non_blank(select_text(card, &resale::PRICE)).unwrap_or_else(|| text_of(card));

                Some(RawTile {
                    title,
                    href: href.to_string(),
                    price_text,
                    breadcrumb: breadcrumb.clone(),
                })
            })
            .collect()
    }

    fn fallback(&self, document: &Html) -> Vec<RawTile> {
        let breadcrumb = self.breadcrumb.clone().unwrap_or_else(|| body_text(document));
        sweep_product_links(document, &resale::PRODUCT_LINK, &breadcrumb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::classifier::Classifier;
    use url::Url;

    fn base() -> Url {
        Url::parse("https://likenew.shop.test/collections/men-finds-under-50").unwrap()
    }

    const COLLECTION: &str = r#"
        <html><body>
            <div class="product-grid">
                <div class="product-grid__card">
                    <a href="/products/abc-jogger-black" title="ABC Jogger"></a>
                    <span class="price">$45.00</span>
                </div>
                <div class="product-grid__card">
                    <a href="/products/metal-vent-tech">
                        <p class="product-card__title">Metal Vent Tech Shirt</p>
                    </a>
                    <div class="product-card__price"><s>$78</s> $29</div>
                </div>
                <a class="product-card" href="https://likenew.shop.test/products/commission-pant">
                    Commission Pant $39
                </a>
                <div class="product-tile"><a href="/pages/about">About resale</a> $5</div>
                <div class="product-grid__card">
                    <a href="/products/abc-jogger-black?variant=2" title="ABC Jogger Again"></a>
                    <span class="price">$45.00</span>
                </div>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_primary_cards() {
        let extractor = ResaleExtractor::new(Some("Like New • Men".to_string()));
        let tiles = extractor.primary(&Html::parse_document(COLLECTION));

        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].title, "ABC Jogger");
        assert_eq!(tiles[0].price_text, "$45.00");
        assert_eq!(tiles[1].title, "Metal Vent Tech Shirt");
        assert_eq!(tiles[1].price_text, "$78 $29");
        assert!(tiles[2].title.contains("Commission Pant"));
        assert!(tiles.iter().all(|t| t.breadcrumb == "Like New • Men"));
    }

    #[test]
    fn test_extract_with_breadcrumb_hint() {
        let extractor = ResaleExtractor::new(Some("Like New • Men".to_string()));
        let candidates = extractor.extract(COLLECTION, &base(), &Classifier::default());

        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].url, "https://likenew.shop.test/products/abc-jogger-black");
        assert_eq!(candidates[0].price, 45.0);
        // First price in the card text wins, even when it is the struck-through one.
        assert_eq!(candidates[1].price, 78.0);
        assert_eq!(candidates[2].title, "Commission Pant $39");
        assert_eq!(candidates[2].price, 39.0);
        assert_eq!(
            candidates[3].url,
            "https://likenew.shop.test/products/abc-jogger-black?variant=2"
        );
        assert!(candidates.iter().all(|c| c.is_target_audience));
    }

    #[test]
    fn test_without_hint_uses_navigation() {
        let html = r#"
            <html><body>
                <header><a href="/collections/men">Men</a></header>
                <div class="product-card"><a href="/products/tee" title="Tee"></a><b class="price">$20</b></div>
            </body></html>
        "#;

        let candidates = ResaleExtractor::default().extract(html, &base(), &Classifier::default());
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].breadcrumb_text.contains("Men"));
        assert!(candidates[0].is_target_audience);
    }

    #[test]
    fn test_fallback_sweep() {
        let html = r#"
            <html><body>
                <section class="grid">
                    <li><a href="/products/swiftly-tech" aria-label="Swiftly Tech Long Sleeve"></a> CA$ 32.00</li>
                </section>
            </body></html>
        "#;

        let extractor = ResaleExtractor::new(Some("Men".to_string()));
        let candidates = extractor.extract(html, &base(), &Classifier::default());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Swiftly Tech Long Sleeve");
        assert_eq!(candidates[0].price, 32.0);
        assert_eq!(candidates[0].breadcrumb_text, "Men");
    }

    #[test]
    fn test_bare_anchors_ignored_when_cards_yield() {
        let html = r#"
            <html><body>
                <div class="product-card"><a href="/products/tee" title="Tee"></a><b class="price">$20</b></div>
                <li><a href="/products/loose-short" aria-label="Loose Short"></a> $25.00</li>
            </body></html>
        "#;

        let extractor = ResaleExtractor::new(Some("Men".to_string()));
        let candidates = extractor.extract(html, &base(), &Classifier::default());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://likenew.shop.test/products/tee");
    }

    #[test]
    fn test_no_products() {
        let candidates = ResaleExtractor::default().extract(
            "<html><body><p>Nothing here</p></body></html>",
            &base(),
            &Classifier::default(),
        );
        assert!(candidates.is_empty());
    }
}
