//! Price ceiling filter.

use super::Filter;
use crate::shop::ProductCandidate;

/// Keeps candidates priced at or below a ceiling.
pub struct PriceFilter {
    max: f64,
}

impl PriceFilter {
    /// Creates a filter with an inclusive maximum price.
    pub fn max(price: f64) -> Self {
        Self { max: price }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, candidate: &ProductCandidate) -> bool {
        candidate.price <= self.max
    }

    fn description(&self) -> String {
        format!("Price: <= ${:.2}", self.max)
    }
}
