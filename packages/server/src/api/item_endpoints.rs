//! Content item endpoints
//!
//! The manager surface: CRUD over the collection plus the ordering and
//! calendar operations the admin UI drives.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Health check endpoint
//! - `GET /api/items` - List the collection, optionally filtered and sorted
//! - `POST /api/items` - Create a new content item
//! - `GET /api/items/:id` - Get an item by ID
//! - `PATCH /api/items/:id` - Update an item
//! - `DELETE /api/items/:id` - Delete an item
//! - `PUT /api/items/order` - Rewrite the display order
//! - `POST /api/items/:id/reschedule` - Move an item to another calendar day

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post, put},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AppState, HttpError};
use vitrine_core::models::time::parse_instant;
use vitrine_core::models::{ContentDraft, ContentItem, ContentKind, ContentPatch};
use vitrine_core::services::{ContentQuery, SortDirection, SortKey};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Query parameters for the item list
///
/// Everything is optional; an empty parameter set returns the whole
/// collection in display order. `tags` is a comma-separated list and
/// every named tag must be present on a matching item.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListItemsParams {
    search: Option<String>,
    #[serde(rename = "type")]
    kind: Option<ContentKind>,
    scheduled_from: Option<String>,
    scheduled_to: Option<String>,
    tags: Option<String>,
    sort: Option<SortKey>,
    direction: Option<SortDirection>,
}

impl ListItemsParams {
    /// Convert the raw parameters into a catalog query
    fn into_query(self) -> Result<ContentQuery, HttpError> {
        let mut query = ContentQuery::new();
        query.search = self.search;
        query.kind = self.kind;
        query.scheduled_from =
            parse_instant_param(self.scheduled_from.as_deref(), "scheduledFrom")?;
        query.scheduled_to = parse_instant_param(self.scheduled_to.as_deref(), "scheduledTo")?;
        if let Some(tags) = self.tags {
            query.tags = tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect();
        }
        query.sort = self.sort;
        query.direction = self.direction.unwrap_or_default();
        Ok(query)
    }
}

fn parse_instant_param(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<DateTime<Utc>>, HttpError> {
    match raw {
        None => Ok(None),
        Some(s) => parse_instant(s).map(Some).ok_or_else(|| {
            HttpError::new(
                format!("Invalid {} value '{}'. Use an ISO 8601 timestamp", name, s),
                "INVALID_INPUT",
            )
        }),
    }
}

/// Health check endpoint
///
/// Returns server status and version information.
///
/// # Example
///
/// ```bash
/// curl http://localhost:4317/api/health
/// ```
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List the collection, optionally filtered and sorted
///
/// # Query Parameters
///
/// - `search`: case-insensitive substring over title, type, and tags
/// - `type`: one of `image`, `webpage`, `text`, `video`
/// - `scheduledFrom` / `scheduledTo`: window containment bounds
/// - `tags`: comma-separated, all required, matched exactly
/// - `sort`: `title`, `type`, `startDateTime`, or `endDateTime`
/// - `direction`: `asc` (default) or `desc`
///
/// # Example
///
/// ```bash
/// curl "http://localhost:4317/api/items?search=menu&type=webpage&sort=startDateTime"
/// ```
async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListItemsParams>,
) -> Result<Json<Vec<ContentItem>>, HttpError> {
    let query = params.into_query()?;
    let items = state.catalog.query_items(&query).await?;
    Ok(Json(items))
}

/// Create a new content item
///
/// # Request Body
///
/// A content draft in the collection wire format:
///
/// ```bash
/// curl -X POST http://localhost:4317/api/items \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Cafeteria menu",
///     "type": "webpage",
///     "content": "https://example.com/menu",
///     "startDateTime": "2024-01-01T08:00:00Z",
///     "endDateTime": "2024-01-31T18:00:00Z",
///     "tags": ["cafeteria"]
///   }'
/// ```
async fn create_item(
    State(state): State<AppState>,
    Json(draft): Json<ContentDraft>,
) -> Result<(StatusCode, Json<ContentItem>), HttpError> {
    let item = state.catalog.create_item(draft).await.map_err(|e| {
        tracing::error!("❌ Item creation failed: {:?}", e);
        HttpError::from(e)
    })?;

    tracing::debug!("✅ Created item: {}", item.id);

    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a content item by ID
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, HttpError> {
    match state.catalog.get_item(&id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(HttpError::new(
            format!("Content item not found: {}", id),
            "ITEM_NOT_FOUND",
        )),
    }
}

/// Update an existing content item
///
/// # Request Body
///
/// JSON object with the fields to change (partial update supported):
///
/// ```bash
/// curl -X PATCH http://localhost:4317/api/items/item-1 \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Updated title"}'
/// ```
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ContentPatch>,
) -> Result<Json<ContentItem>, HttpError> {
    let updated = state.catalog.update_item(&id, &update).await.map_err(|e| {
        tracing::error!("❌ Item update failed for {}: {:?}", id, e);
        HttpError::from(e)
    })?;

    tracing::debug!("✅ Updated item: {}", id);

    Ok(Json(updated))
}

/// Delete a content item by ID
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if !state.catalog.remove_item(&id).await? {
        return Err(HttpError::new(
            format!("Content item not found: {}", id),
            "ITEM_NOT_FOUND",
        ));
    }

    tracing::debug!("✅ Deleted item: {}", id);

    Ok(StatusCode::OK)
}

/// Rewrite the display order of the collection
///
/// The body is the full list of item ids in their new order; it must be a
/// permutation of the stored ids.
async fn reorder_items(
    State(state): State<AppState>,
    Json(ordered_ids): Json<Vec<String>>,
) -> Result<Json<Vec<ContentItem>>, HttpError> {
    let items = state.catalog.reorder_items(&ordered_ids).await?;
    Ok(Json(items))
}

/// Request body for calendar rescheduling
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    /// Target calendar day (`YYYY-MM-DD`)
    pub day: NaiveDate,
}

/// Move an item's window to another calendar day
///
/// Keeps the time of day and the window duration; only the date changes.
/// This backs calendar drag-and-drop in the manager UI.
async fn reschedule_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RescheduleRequest>,
) -> Result<Json<ContentItem>, HttpError> {
    let moved = state.catalog.reschedule_item(&id, request.day).await?;
    Ok(Json(moved))
}

/// Create router with all item endpoints
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/items", get(list_items))
        .route("/api/items", post(create_item))
        .route("/api/items/order", put(reorder_items))
        .route("/api/items/:id", get(get_item))
        .route("/api/items/:id", patch(update_item))
        .route("/api/items/:id", delete(delete_item))
        .route("/api/items/:id/reschedule", post(reschedule_item))
        .with_state(state)
}
