//! HTTP API for the Vitrine content server
//!
//! # Architecture
//!
//! The API is organized into modular endpoint modules, each exposing a
//! `routes()` function merged into one `axum` application:
//! - `item_endpoints`: manager CRUD, ordering, and list queries
//! - `display_endpoints`: viewer snapshot and active-item listing
//! - `event_endpoints`: Server-Sent Events change feed
//! - `session_endpoints`: display login gate
//!
//! # Security
//!
//! - Binds to 127.0.0.1 only
//! - CORS restricted to the manager UI origins (configurable via
//!   CORS_ALLOW_ORIGIN)
//! - The display session is a UI gate, not authentication

use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

use vitrine_core::services::{CatalogService, DisplayFrame};

// Manager CRUD and list queries
mod item_endpoints;

// Viewer snapshot and active items
mod display_endpoints;

// Server-Sent Events change feed
mod event_endpoints;

// Display login gate
mod session_endpoints;

// Shared HTTP error handling
mod http_error;

// Re-export HttpError for use by endpoint modules
pub use http_error::HttpError;

/// Application state shared across all endpoints
///
/// Cloning is cheap: the catalog clones its inner handles, the frame
/// receiver is a `watch` subscription, and the user list is shared.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub frames: watch::Receiver<DisplayFrame>,
    pub display_users: Arc<Vec<String>>,
}

/// Create the main application router with all endpoint modules
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(item_endpoints::routes(state.clone()))
        .merge(display_endpoints::routes(state.clone()))
        .merge(event_endpoints::routes(state.clone()))
        .merge(session_endpoints::routes(state))
        .layer(cors_layer())
}

/// Create CORS layer for the manager UI
///
/// Allows requests from the Angular dev server. Supports configurable
/// origins via the CORS_ALLOW_ORIGIN environment variable when the UI
/// runs on a different port.
///
/// Default: http://localhost:4200
/// Configure: CORS_ALLOW_ORIGIN="http://localhost:4300" cargo run ...
fn cors_layer() -> CorsLayer {
    let default_origins = [
        "http://localhost:4200", // Angular default
        "http://127.0.0.1:4200", // Alternative localhost spelling
        "http://localhost:4201", // Fallback if 4200 busy
    ];

    // Check for custom CORS origin from environment
    let origins: Vec<header::HeaderValue> =
        if let Ok(custom_origin) = std::env::var("CORS_ALLOW_ORIGIN") {
            vec![custom_origin
                .parse::<header::HeaderValue>()
                .expect("Invalid CORS_ALLOW_ORIGIN - must be valid HTTP origin")]
        } else {
            default_origins
                .iter()
                .map(|o| o.parse::<header::HeaderValue>().unwrap())
                .collect()
        };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .allow_credentials(false)
}

/// Start the HTTP server
///
/// # Arguments
///
/// * `catalog` - Content catalog backing all endpoints
/// * `frames` - Display frame feed from the playback loop
/// * `display_users` - Usernames accepted by the session endpoint
/// * `port` - Port to listen on (typically 4317)
///
/// # Errors
///
/// Returns error if the server fails to bind or start.
pub async fn start_server(
    catalog: CatalogService,
    frames: watch::Receiver<DisplayFrame>,
    display_users: Vec<String>,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState {
        catalog,
        frames,
        display_users: Arc::new(display_users),
    };
    let app = create_router(state);

    let addr = format!("127.0.0.1:{}", port);
    tracing::info!("🚀 Vitrine server starting on http://{}", addr);
    tracing::info!("📡 CORS enabled for http://localhost:4200");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
