//! JSON File Store
//!
//! Persists the content collection as a single JSON array in one file, the
//! direct analogue of the single browser-storage key the collection
//! originally lived under. Writes are atomic (write-to-temp, then rename)
//! and quota-checked before the existing file is touched, so a failed save
//! always leaves the previously persisted state intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::models::ContentItem;
use crate::store::content_store::ContentStore;
use crate::store::error::StoreError;

/// Default storage quota for the serialized collection (10 MiB), matching
/// the budget browsers grant a single origin's local storage
pub const DEFAULT_QUOTA_BYTES: usize = 10 * 1024 * 1024;

/// File-backed [`ContentStore`] holding the collection as one JSON array
pub struct JsonFileStore {
    path: PathBuf,
    quota_bytes: usize,
}

impl JsonFileStore {
    /// Create a store backed by the given file with the default quota
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }

    /// Create a store with a custom quota in bytes
    pub fn with_quota(path: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            path: path.into(),
            quota_bytes,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Quota applied to the serialized collection
    pub fn quota_bytes(&self) -> usize {
        self.quota_bytes
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

#[async_trait]
impl ContentStore for JsonFileStore {
    /// Load the collection, leniently.
    ///
    /// A missing file or a document that is not a JSON array yields an
    /// empty collection; individual entries that fail to deserialize are
    /// skipped. Both cases are logged and never surface as errors.
    async fn load(&self) -> Result<Vec<ContentItem>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).await?;

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Stored collection at {} is not valid JSON ({}), starting empty",
                    self.path.display(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        let total = entries.len();
        let items: Vec<ContentItem> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping malformed content item: {}", e);
                    None
                }
            })
            .collect();

        if items.len() < total {
            tracing::warn!(
                "Loaded {} of {} stored content items from {}",
                items.len(),
                total,
                self.path.display()
            );
        }

        Ok(items)
    }

    async fn save(&self, items: &[ContentItem]) -> Result<(), StoreError> {
        let serialized = serde_json::to_vec(items)
            .map_err(|e| StoreError::serialization_failure(e.to_string()))?;

        if serialized.len() > self.quota_bytes {
            return Err(StoreError::quota_exceeded(serialized.len(), self.quota_bytes));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = self.temp_path();
        fs::write(&temp_path, &serialized).await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!(
            "Saved {} content items ({} bytes) to {}",
            items.len(),
            serialized.len(),
            self.path.display()
        );

        Ok(())
    }
}
