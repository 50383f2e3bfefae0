//! Catalog event stream
//!
//! Server-sent events pushing catalog changes to connected clients, so
//! manager and viewer screens update without polling. Event names come
//! from [`CatalogEvent::event_type`]; the data payload is the affected
//! item, or the whole collection for a replace.
//!
//! A subscriber that falls behind the broadcast channel gets a
//! `collection:stale` event and should refetch the collection.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::api::AppState;
use vitrine_core::services::CatalogEvent;

/// JSON payload for one catalog event
fn event_payload(event: &CatalogEvent) -> serde_json::Value {
    match event {
        CatalogEvent::ItemCreated(item) | CatalogEvent::ItemUpdated(item) => {
            serde_json::json!(item)
        }
        CatalogEvent::ItemRemoved { id } => serde_json::json!({ "id": id }),
        CatalogEvent::CollectionReplaced(items) => serde_json::json!(items),
    }
}

/// SSE stream of catalog events
///
/// # Example
///
/// ```bash
/// curl -N http://localhost:4317/api/events
/// ```
async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.catalog.subscribe_to_events();

    let stream = BroadcastStream::new(receiver).filter_map(|received| match received {
        Ok(event) => Event::default()
            .event(event.event_type())
            .json_data(event_payload(&event))
            .ok()
            .map(Ok),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("SSE subscriber lagged, {} events dropped", skipped);
            Some(Ok(Event::default()
                .event("collection:stale")
                .data(skipped.to_string())))
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Create router with the event stream endpoint
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(event_stream))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vitrine_core::models::{Content, ContentItem};

    fn item(title: &str) -> ContentItem {
        ContentItem::new(
            title,
            Content::Text(format!("{title} body")),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_item_events_carry_the_item() {
        let created = item("Fresh");
        let payload = event_payload(&CatalogEvent::ItemCreated(created.clone()));
        assert_eq!(payload.get("title").unwrap(), "Fresh");
        assert_eq!(payload.get("id").unwrap(), created.id.as_str());
    }

    #[test]
    fn test_removal_carries_only_the_id() {
        let payload = event_payload(&CatalogEvent::ItemRemoved {
            id: "item-1".to_string(),
        });
        assert_eq!(payload, serde_json::json!({ "id": "item-1" }));
    }

    #[test]
    fn test_replace_carries_the_collection() {
        let payload =
            event_payload(&CatalogEvent::CollectionReplaced(vec![item("A"), item("B")]));
        let titles: Vec<&str> = payload
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.get("title").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
