//! Content Catalog Service
//!
//! [`CatalogService`] is the single write path to the content collection.
//! Every mutation goes through it: the service validates the input,
//! rewrites the whole collection in the injected [`ContentStore`], and
//! broadcasts a [`CatalogEvent`] once the save has succeeded. Reads hand
//! out snapshots; callers never share mutable state with the catalog.
//!
//! Writes are serialized through an internal lock, so two admin requests
//! cannot interleave their load-modify-save cycles within one process.
//! Across processes the store keeps its last-writer-wins semantics.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{broadcast, Mutex};

use crate::models::{ContentDraft, ContentItem, ContentPatch};
use crate::services::error::CatalogError;
use crate::services::events::CatalogEvent;
use crate::services::query::ContentQuery;
use crate::services::visibility;
use crate::store::ContentStore;

/// Broadcast channel capacity for catalog events.
///
/// 128 provides sufficient headroom for burst operations while limiting
/// memory overhead. Subscriber lag is acceptable since consumers can
/// reload the collection to resynchronize.
const CATALOG_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Single write path over the content collection
///
/// Cloning is cheap: clones share the store, the write lock, and the
/// event channel, so a service handed to multiple request handlers still
/// serializes writes and reaches the same subscribers.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vitrine_core::services::CatalogService;
/// use vitrine_core::store::JsonFileStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = Arc::new(JsonFileStore::new("./data/content.json"));
///     let catalog = CatalogService::new(store);
///
///     for item in catalog.list_items().await? {
///         println!("{} ({})", item.title, item.kind());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CatalogService {
    /// Injected persistence backend
    store: Arc<dyn ContentStore>,

    /// Broadcast channel for catalog events (128 subscriber capacity)
    event_tx: broadcast::Sender<CatalogEvent>,

    /// Serializes load-modify-save cycles within this process
    write_lock: Arc<Mutex<()>>,
}

impl CatalogService {
    /// Create a new CatalogService over the given store
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        let (event_tx, _) = broadcast::channel(CATALOG_EVENT_CHANNEL_CAPACITY);

        Self {
            store,
            event_tx,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Subscribe to catalog events
    ///
    /// Returns a broadcast receiver that sees every change committed after
    /// the subscription: item created, updated, removed, or the whole
    /// collection replaced. A receiver that lags behind gets
    /// `RecvError::Lagged` and should reload the collection.
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.event_tx.subscribe()
    }

    /// Emit a catalog event to all subscribers
    ///
    /// Internal helper called after successful saves only. Ignores errors
    /// if no subscribers (expected in some tests).
    fn emit_event(&self, event: CatalogEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Read the whole collection, in display order
    pub async fn list_items(&self) -> Result<Vec<ContentItem>, CatalogError> {
        Ok(self.store.load().await?)
    }

    /// Read a single item by id
    pub async fn get_item(&self, id: &str) -> Result<Option<ContentItem>, CatalogError> {
        let items = self.store.load().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    /// Filter and sort the collection with a [`ContentQuery`]
    pub async fn query_items(
        &self,
        query: &ContentQuery,
    ) -> Result<Vec<ContentItem>, CatalogError> {
        let items = self.store.load().await?;
        Ok(query.apply(&items))
    }

    /// Compute the subset of the collection active at `now`
    pub async fn active_items(&self, now: DateTime<Utc>) -> Result<Vec<ContentItem>, CatalogError> {
        let items = self.store.load().await?;
        Ok(visibility::active_items(&items, now))
    }

    /// Validate a draft and append it to the collection
    ///
    /// The item receives a fresh UUID and goes to the end of the display
    /// order. The created event is broadcast only after the save succeeded.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` when the draft is missing a required
    /// field or has an inverted window, and `StoreFailed` when persisting
    /// the grown collection fails (quota, I/O); the stored collection is
    /// unchanged in either case.
    pub async fn create_item(&self, draft: ContentDraft) -> Result<ContentItem, CatalogError> {
        let item = draft.into_item()?;

        let _guard = self.write_lock.lock().await;
        let mut items = self.store.load().await?;
        items.push(item.clone());
        self.store.save(&items).await?;

        tracing::info!(
            "Created content item '{}' ({}, {} total)",
            item.title,
            item.kind(),
            items.len()
        );
        self.emit_event(CatalogEvent::ItemCreated(item.clone()));
        Ok(item)
    }

    /// Apply a patch to an existing item
    ///
    /// Absent patch fields leave the stored value untouched. The patched
    /// item is re-validated before anything is written, so a patch cannot
    /// empty the title or payload, nor invert the window.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for an unknown id, `ValidationFailed` when
    /// the patched item would be invalid, or `StoreFailed` when the save
    /// fails. The stored collection is unchanged on any error.
    pub async fn update_item(
        &self,
        id: &str,
        patch: &ContentPatch,
    ) -> Result<ContentItem, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.store.load().await?;

        let target = match items.iter_mut().find(|item| item.id == id) {
            Some(item) => item,
            None => return Err(CatalogError::item_not_found(id)),
        };

        let mut updated = target.clone();
        patch.apply_to(&mut updated)?;
        *target = updated.clone();

        self.store.save(&items).await?;

        tracing::info!("Updated content item '{}'", updated.title);
        self.emit_event(CatalogEvent::ItemUpdated(updated.clone()));
        Ok(updated)
    }

    /// Remove an item by id (hard delete, no tombstone)
    ///
    /// Returns `Ok(true)` when an item was removed and `Ok(false)` when no
    /// item carried the id; removal of an absent item is not an error.
    pub async fn remove_item(&self, id: &str) -> Result<bool, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.store.load().await?;

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }

        self.store.save(&items).await?;

        tracing::info!("Removed content item {}", id);
        self.emit_event(CatalogEvent::ItemRemoved { id: id.to_string() });
        Ok(true)
    }

    /// Rewrite the display order of the whole collection
    ///
    /// `ordered_ids` must be a permutation of the stored ids. Returns the
    /// collection in its new order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReorder` when the id list has the wrong length,
    /// repeats an id, or names an unknown id. The stored order is
    /// unchanged on any error.
    pub async fn reorder_items(
        &self,
        ordered_ids: &[String],
    ) -> Result<Vec<ContentItem>, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let items = self.store.load().await?;

        if ordered_ids.len() != items.len() {
            return Err(CatalogError::invalid_reorder(format!(
                "expected {} ids, got {}",
                items.len(),
                ordered_ids.len()
            )));
        }

        let mut by_id: HashMap<String, ContentItem> = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        let mut reordered = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            // remove() consumes the entry, so duplicates fail as unknown
            let item = by_id.remove(id).ok_or_else(|| {
                CatalogError::invalid_reorder(format!("unknown or duplicate id: {id}"))
            })?;
            reordered.push(item);
        }

        self.store.save(&reordered).await?;

        tracing::info!("Reordered collection ({} items)", reordered.len());
        self.emit_event(CatalogEvent::CollectionReplaced(reordered.clone()));
        Ok(reordered)
    }

    /// Move an item's window to another calendar day
    ///
    /// Keeps the time of day and the window duration; only the date of the
    /// start boundary changes. This backs calendar drag-and-drop.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for an unknown id or `StoreFailed` when the
    /// save fails.
    pub async fn reschedule_item(
        &self,
        id: &str,
        day: NaiveDate,
    ) -> Result<ContentItem, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.store.load().await?;

        let target = match items.iter_mut().find(|item| item.id == id) {
            Some(item) => item,
            None => return Err(CatalogError::item_not_found(id)),
        };

        let duration = target.end - target.start;
        let start = day.and_time(target.start.time()).and_utc();
        target.start = start;
        target.end = start + duration;
        let updated = target.clone();

        self.store.save(&items).await?;

        tracing::info!("Rescheduled content item '{}' to {}", updated.title, day);
        self.emit_event(CatalogEvent::ItemUpdated(updated.clone()));
        Ok(updated)
    }
}
