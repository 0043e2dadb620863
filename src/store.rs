//! Durable record of already-notified product URLs.

use crate::shop::ProductCandidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors writing the seen-set. Reads never fail.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write state file in {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode seen set: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to replace state file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Set of URLs that have already been notified. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet {
    urls: BTreeSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Records a URL. Returns false if it was already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Splits candidates into `(already_seen, new)`, keeping their order.
    pub fn partition(
        &self,
        candidates: Vec<ProductCandidate>,
    ) -> (Vec<ProductCandidate>, Vec<ProductCandidate>) {
        candidates.into_iter().partition(|c| self.contains(&c.url))
    }
}

impl<S: Into<String>> Extend<S> for SeenSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for url in iter {
            self.insert(url);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SeenSet::new();
        set.extend(iter);
        set
    }
}

/// JSON-file backed storage for the seen-set.
#[derive(Debug, Clone)]
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the seen-set. A missing, unreadable or corrupt file yields an empty set.
    pub fn load(&self) -> SeenSet {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", self.path.display());
                return SeenSet::new();
            }
            Err(e) => {
                warn!("Could not read state file {}: {}. Starting empty", self.path.display(), e);
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<SeenSet>(&content) {
            Ok(seen) => {
                debug!("Loaded {} seen URLs from {}", seen.len(), self.path.display());
                seen
            }
            Err(e) => {
                warn!("Ignoring corrupt state file {}: {}", self.path.display(), e);
                SeenSet::new()
            }
        }
    }

    /// Replaces the state file with the whole set in one atomic rename.
    pub fn persist(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(seen)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_error = |source| StoreError::Io { path: dir.to_path_buf(), source };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(json.as_bytes()).map_err(io_error)?;
        tmp.as_file().sync_all().map_err(io_error)?;

        tmp.persist(&self.path)
            .map_err(|source| StoreError::Persist { path: self.path.clone(), source })?;

        info!("Saved {} seen URLs to {}", seen.len(), self.path.display());
        Ok(())
    }
}
