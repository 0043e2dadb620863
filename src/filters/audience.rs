//! Target-audience filter.

use super::Filter;
use crate::shop::ProductCandidate;

/// Keeps only candidates classified as aimed at the target audience.
pub struct AudienceFilter;

impl AudienceFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AudienceFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for AudienceFilter {
    fn matches(&self, candidate: &ProductCandidate) -> bool {
        candidate.is_target_audience
    }

    fn description(&self) -> String {
        "Target audience only".to_string()
    }
}
