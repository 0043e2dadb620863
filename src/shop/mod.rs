//! Listing page retrieval, extraction and classification.

pub mod classifier;
pub mod client;
pub mod extract;
pub mod models;
pub mod price;
pub mod selectors;

pub use classifier::Classifier;
pub use client::{PageFetch, ShopClient};
pub use extract::{Extractor, Template};
pub use models::{dedup_by_url, ProductCandidate};
pub use price::parse_price;
