//! CSS selectors for listing page parsing.
//!
//! All markup-shape heuristics live here, one module per template.
//! Update this file when a storefront changes its HTML structure.
//!
//! **Update process**: When extraction comes back empty, save the page with
//! `shelfwatch check`, update selectors, and add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors shared by every template.
pub mod page {
    use super::*;

    /// Document body, the breadcrumb source of last resort.
    pub static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

    /// Any anchor.
    pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    /// Page-level navigation text (breadcrumbs, menus, headers).
    pub static NAVIGATION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("nav, header").unwrap());

    /// Element names accepted as a tile container around a bare anchor.
    pub const CONTAINER_TAGS: &[&str] = &["div", "li", "article"];
}

/// Selectors for storefront catalog grids (`/p/` product links).
pub mod catalog {
    use super::*;

    /// Path convention for product links.
    pub const PRODUCT_PATH: &str = "/p/";

    /// Candidate tile containers.
    pub static TILE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li, div").unwrap());

    /// Elements carrying a `title` attribute.
    pub static TITLED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[title]").unwrap());

    /// Price-labeled elements inside a tile.
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "[data-testid='price'], \
             [class*='price'], \
             .markdown-price, \
             .product-price",
        )
        .unwrap()
    });

    /// Page-level breadcrumb and navigation text.
    pub static BREADCRUMB: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "[aria-label*='Men'], \
             [data-breadcrumb], \
             nav, \
             header",
        )
        .unwrap()
    });

    /// Bare product anchors for the fallback sweep.
    pub static PRODUCT_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href*='/p/']").unwrap());
}

/// Selectors for resale collection grids (`/products/` product links).
pub mod resale {
    use super::*;

    /// Path convention for product links.
    pub const PRODUCT_PATH: &str = "/products/";

    /// Product cards.
    pub static CARD: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".product-tile, \
             .product-grid__card, \
             .product-card",
        )
        .unwrap()
    });

    /// Title elements inside a card.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-title, [class*='title']").unwrap());

    /// Price elements inside a card.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".price, [class*='price']").unwrap());

    /// Bare product anchors for the fallback sweep.
    pub static PRODUCT_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href*='/products/']").unwrap());
}
