//! Viewer display endpoints
//!
//! Read-only surface for display screens: the current frame of the
//! playback loop (the polling fallback for viewers without an SSE
//! connection) and the raw active subset.

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use serde::Serialize;

use crate::api::{AppState, HttpError};
use vitrine_core::media;
use vitrine_core::models::{ContentItem, ContentKind};
use vitrine_core::services::DisplayFrame;

/// The current display frame plus viewer rendering hints
///
/// When the displayed item is a YouTube video the viewer needs the embed
/// and thumbnail URLs; everything else passes the frame through untouched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResponse {
    #[serde(flatten)]
    pub frame: DisplayFrame,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl DisplayResponse {
    fn from_frame(frame: DisplayFrame) -> Self {
        let video_id = frame
            .item
            .as_ref()
            .filter(|item| item.kind() == ContentKind::Video)
            .and_then(|item| media::youtube_video_id(item.content.payload()))
            .map(str::to_string);

        Self {
            embed_url: video_id.as_deref().map(media::youtube_embed_url),
            thumbnail_url: video_id.as_deref().map(media::youtube_thumbnail_url),
            frame,
        }
    }
}

/// Current display frame
///
/// Returns the latest frame published by the playback loop; `item` is
/// null when nothing is active and the viewer shows its idle screen.
async fn current_display(State(state): State<AppState>) -> Json<DisplayResponse> {
    let frame = state.frames.borrow().clone();
    Json(DisplayResponse::from_frame(frame))
}

/// Active subset of the collection at the current instant
async fn active_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentItem>>, HttpError> {
    let items = state.catalog.active_items(Utc::now()).await?;
    Ok(Json(items))
}

/// Create router with the viewer endpoints
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/display", get(current_display))
        .route("/api/display/active", get(active_items))
        .with_state(state)
}
