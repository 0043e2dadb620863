//! Candidate filtering and cross-source aggregation.

pub mod audience;
pub mod category;
pub mod price;

use crate::shop::models::{dedup_by_url, ProductCandidate};

pub use audience::AudienceFilter;
pub use category::CategoryFilter;
pub use price::PriceFilter;

/// Trait for filtering candidates.
pub trait Filter: Send + Sync {
    /// Returns true if the candidate passes the filter.
    fn matches(&self, candidate: &ProductCandidate) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a candidate passes all filters.
    pub fn matches(&self, candidate: &ProductCandidate) -> bool {
        self.filters.iter().all(|f| f.matches(candidate))
    }

    /// Filters a collection of candidates.
    pub fn apply(&self, candidates: Vec<ProductCandidate>) -> Vec<ProductCandidate> {
        candidates.into_iter().filter(|c| self.matches(c)).collect()
    }

    /// Filters the merged output of every source, then drops URL duplicates
    /// so a product listed on two pages counts once, in first-seen order.
    pub fn aggregate(&self, candidates: Vec<ProductCandidate>) -> Vec<ProductCandidate> {
        dedup_by_url(self.apply(candidates))
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Keeps only candidates aimed at the target audience.
    pub fn target_audience(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(AudienceFilter::new());
        }
        self
    }

    /// Drops candidates in an excluded category.
    pub fn exclude_accessories(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(CategoryFilter::new());
        }
        self
    }

    /// Adds an inclusive price ceiling.
    pub fn price_ceiling(mut self, ceiling: Option<f64>) -> Self {
        if let Some(max) = ceiling {
            self.chain.add(PriceFilter::max(max));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candidate(url: &str, price: f64, audience: bool, accessory: bool) -> ProductCandidate {
        ProductCandidate {
            title: "Test Product".to_string(),
            url: url.to_string(),
            price,
            breadcrumb_text: String::new(),
            is_accessory: accessory,
            is_target_audience: audience,
        }
    }

    fn default_chain(ceiling: f64) -> FilterChain {
        FilterChainBuilder::new()
            .target_audience(true)
            .exclude_accessories(true)
            .price_ceiling(Some(ceiling))
            .build()
    }

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert!(chain.descriptions().is_empty());
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::default();
        assert!(chain.matches(&make_candidate("https://shop.test/p/1", 500.0, false, true)));
    }

    #[test]
    fn test_filter_chain() {
        let chain = default_chain(40.0);
        assert!(!chain.is_empty());

        assert!(chain.matches(&make_candidate("https://shop.test/p/1", 35.0, true, false)));
        assert!(chain.matches(&make_candidate("https://shop.test/p/1", 40.0, true, false)));
        assert!(!chain.matches(&make_candidate("https://shop.test/p/1", 40.01, true, false)));
        assert!(!chain.matches(&make_candidate("https://shop.test/p/1", 20.0, true, true)));
        assert!(!chain.matches(&make_candidate("https://shop.test/p/1", 20.0, false, false)));
    }

    #[test]
    fn test_filter_chain_builder_no_filters_when_disabled() {
        let chain = FilterChainBuilder::new()
            .target_audience(false)
            .exclude_accessories(false)
            .price_ceiling(None)
            .build();

        assert!(chain.is_empty());
    }

    #[test]
    fn test_filter_chain_descriptions() {
        let descriptions = default_chain(40.0).descriptions();
        assert_eq!(descriptions.len(), 3);
        assert!(descriptions[0].contains("audience"));
        assert!(descriptions[1].contains("accessories"));
        assert!(descriptions[2].contains("Price"));
    }

    #[test]
    fn test_aggregate_filters_and_dedups_across_sources() {
        let from_first_page = vec![
            make_candidate("https://shop.test/p/tee", 35.0, true, false),
            make_candidate("https://shop.test/p/mat", 20.0, true, true),
            make_candidate("https://shop.test/p/short", 38.0, true, false),
        ];
        let from_second_page = vec![
            make_candidate("https://shop.test/p/jacket", 128.0, true, false),
            make_candidate("https://shop.test/p/tee", 30.0, true, false),
            make_candidate("https://shop.test/p/pant", 39.0, true, false),
        ];

        let mut merged = from_first_page;
        merged.extend(from_second_page);

        let matches = default_chain(40.0).aggregate(merged);
        let urls: Vec<&str> = matches.iter().map(|c| c.url.as_str()).collect();

        assert_eq!(
            urls,
            vec!["https://shop.test/p/tee", "https://shop.test/p/short", "https://shop.test/p/pant"]
        );
        assert_eq!(matches[0].price, 35.0);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(default_chain(40.0).aggregate(Vec::new()).is_empty());
    }
}
