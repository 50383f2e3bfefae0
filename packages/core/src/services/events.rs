//! Catalog Change Events
//!
//! This module defines the events emitted by [`CatalogService`] whenever the
//! content collection changes. They follow the observer pattern: interested
//! parties (the playback loop, the HTTP event stream) subscribe to changes
//! without coupling to the persistence layer.
//!
//! # Event Flow
//!
//! 1. CatalogService performs a write (create, update, remove, reorder, ...)
//! 2. The new collection is saved to the store
//! 3. Only after a successful save, the matching event is broadcast
//! 4. All subscribers receive the event asynchronously
//!
//! Subscribers that fall too far behind receive a `Lagged` error from the
//! broadcast channel and should re-read the collection to resynchronize.
//!
//! [`CatalogService`]: crate::services::CatalogService

use crate::models::ContentItem;

/// Events emitted after a catalog write has been durably saved
///
/// Each event carries the affected item (or the whole collection for bulk
/// operations), so subscribers can often react without another store read.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// A new content item was created
    ItemCreated(ContentItem),

    /// An existing content item was updated (including reschedules)
    ItemUpdated(ContentItem),

    /// A content item was removed
    ItemRemoved { id: String },

    /// The whole collection changed at once (reorder, bulk import)
    CollectionReplaced(Vec<ContentItem>),
}

impl CatalogEvent {
    /// Get a string representation of the event type
    ///
    /// Used as the SSE event name and in log lines.
    pub fn event_type(&self) -> &str {
        match self {
            CatalogEvent::ItemCreated(_) => "item:created",
            CatalogEvent::ItemUpdated(_) => "item:updated",
            CatalogEvent::ItemRemoved { .. } => "item:removed",
            CatalogEvent::CollectionReplaced(_) => "collection:replaced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Content;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_event_type_names() {
        let item = ContentItem::new(
            "Welcome",
            Content::Text("hello".to_string()),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        );

        assert_eq!(
            CatalogEvent::ItemCreated(item.clone()).event_type(),
            "item:created"
        );
        assert_eq!(
            CatalogEvent::ItemUpdated(item.clone()).event_type(),
            "item:updated"
        );
        assert_eq!(
            CatalogEvent::ItemRemoved { id: item.id }.event_type(),
            "item:removed"
        );
        assert_eq!(
            CatalogEvent::CollectionReplaced(vec![]).event_type(),
            "collection:replaced"
        );
    }
}
