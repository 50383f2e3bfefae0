//! Vitrine Content Server Binary
//!
//! Standalone binary that serves the digital-signage HTTP API: manager
//! CRUD on one side, the viewer's display feed on the other.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 4317, content under ~/.vitrine)
//! cargo run -p vitrine-server
//!
//! # Custom port and content file
//! VITRINE_PORT=8080 VITRINE_CONTENT_PATH=/tmp/content.json cargo run -p vitrine-server
//! ```
//!
//! # Environment Variables
//!
//! - `VITRINE_PORT`: Server port (default: 4317, or the config file value)
//! - `VITRINE_CONTENT_PATH`: Content storage file (overrides the config file)
//! - `CORS_ALLOW_ORIGIN`: Extra allowed origin for the manager UI
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::sync::Arc;
use std::time::Duration;

use vitrine_core::services::{CatalogService, PlaybackConfig, PlaybackService};
use vitrine_core::store::JsonFileStore;

use vitrine_server::{api, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🚀 Vitrine Content Server");
    tracing::info!("==================================");

    // Load configuration, writing the defaults on first run
    let config_file = config::config_file_path()?;
    let server_config = config::load_config().await?;

    if !config_file.exists() {
        config::save_config(&server_config).await?;
        tracing::info!("📝 Wrote default configuration to {}", config_file.display());
    }

    let port = config::resolve_port(&server_config);
    tracing::info!("📡 Port: {}", port);

    // Determine the content storage file
    let content_path = config::resolve_content_path(&server_config)?;

    // Ensure the content directory exists
    if let Some(parent) = content_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tracing::info!("📦 Content file: {}", content_path.display());

    // Initialize services
    tracing::info!("🔧 Initializing services...");

    let store = Arc::new(JsonFileStore::with_quota(
        content_path,
        server_config.quota_bytes,
    ));
    let catalog = CatalogService::new(store);

    // Playback drives the viewer's display frames; the task ends with
    // the process on shutdown
    let playback = PlaybackService::new(
        catalog.clone(),
        PlaybackConfig::new(
            Duration::from_secs(server_config.rotation_seconds),
            Duration::from_secs(server_config.refresh_seconds),
        ),
    );
    let frames = playback.frames();
    tokio::spawn(playback.run());

    tracing::info!("✅ Services initialized");

    // Start HTTP server
    api::start_server(catalog, frames, server_config.display_users, port).await?;

    Ok(())
}
