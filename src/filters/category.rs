//! Excluded-category filter.

use super::Filter;
use crate::shop::ProductCandidate;

/// Drops candidates matching the exclusion vocabulary.
pub struct CategoryFilter;

impl CategoryFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, candidate: &ProductCandidate) -> bool {
        !candidate.is_accessory
    }

    fn description(&self) -> String {
        "Exclude accessories".to_string()
    }
}
