//! In-Memory Store
//!
//! A [`ContentStore`] holding the collection in process memory, used by
//! tests and ephemeral runs. Honors the same quota contract as the file
//! store by measuring the serialized collection size.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::ContentItem;
use crate::store::content_store::ContentStore;
use crate::store::error::StoreError;

/// Memory-backed [`ContentStore`] for testing and ephemeral use
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<ContentItem>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with the given collection
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: Mutex::new(items),
            quota_bytes: None,
        }
    }

    /// Create an empty store that enforces a quota on save
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn load(&self) -> Result<Vec<ContentItem>, StoreError> {
        Ok(self.items.lock().await.clone())
    }

    async fn save(&self, items: &[ContentItem]) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            let serialized = serde_json::to_vec(items)
                .map_err(|e| StoreError::serialization_failure(e.to_string()))?;
            if serialized.len() > quota {
                return Err(StoreError::quota_exceeded(serialized.len(), quota));
            }
        }

        *self.items.lock().await = items.to_vec();
        Ok(())
    }
}
