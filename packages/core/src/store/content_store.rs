//! Content Store Interface
//!
//! The persistence seam of the system. A [`ContentStore`] holds the whole
//! ordered collection as the unit of read and write: there are no partial
//! updates and no transactions, and a later `save` overwrites an earlier one
//! wholesale (last-writer-wins). Both the manager and viewer sides receive
//! the store through this trait rather than touching the backing storage
//! directly.

use async_trait::async_trait;

use crate::models::ContentItem;
use crate::store::error::StoreError;

/// Whole-collection persistence for content items
///
/// Implementations must uphold two contracts from the persistence design:
///
/// - `load` returns an empty collection (not an error) when the backing
///   data is missing or corrupt, so callers stay usable.
/// - `save` rejects collections that exceed the storage quota *before*
///   touching the previously persisted state.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read a snapshot of the full collection, in display order
    async fn load(&self) -> Result<Vec<ContentItem>, StoreError>;

    /// Replace the full collection
    async fn save(&self, items: &[ContentItem]) -> Result<(), StoreError>;
}
