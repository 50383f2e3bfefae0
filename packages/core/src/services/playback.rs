//! Display Playback Loop
//!
//! [`PlaybackService`] drives the viewer side of the system: it keeps a
//! snapshot of the collection, computes the active subset against the
//! current instant, rotates a cursor through that subset on a fixed tick,
//! and publishes the resulting [`DisplayFrame`] through a watch channel.
//!
//! # Synchronization
//!
//! Catalog events are the primary way the loop learns about changes: it
//! subscribes to [`CatalogService`] and reloads the snapshot whenever an
//! event arrives. A periodic refresh tick re-reads the store as a
//! fallback, which also picks up writes made by other processes that
//! never reach this process's event channel.
//!
//! With no active items the loop publishes an empty frame (the "no
//! content" state) and resumes rotation once an item becomes active.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::models::{ContentItem, SystemTimeProvider, TimeProvider};
use crate::services::catalog::CatalogService;
use crate::services::error::CatalogError;
use crate::services::events::CatalogEvent;
use crate::services::rotation::Rotation;
use crate::services::visibility;

/// Default time a slide stays on screen before the cursor advances
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(10);

/// Default interval of the store re-read fallback
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Timing configuration for the playback loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Time between cursor advances
    pub rotation_interval: Duration,

    /// Time between fallback store re-reads
    pub refresh_interval: Duration,
}

impl PlaybackConfig {
    pub fn new(rotation_interval: Duration, refresh_interval: Duration) -> Self {
        Self {
            rotation_interval,
            refresh_interval,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rotation_interval: DEFAULT_ROTATION_INTERVAL,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// What the viewer should show right now
///
/// `item` is `None` while nothing is active; `cursor` then sits at zero
/// and `active_count` is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFrame {
    /// The item under the rotation cursor, if anything is active
    pub item: Option<ContentItem>,

    /// Position of the rotation cursor within the active subset
    pub cursor: usize,

    /// Size of the active subset the cursor rotates over
    pub active_count: usize,

    /// Instant the frame was computed at
    pub generated_at: DateTime<Utc>,
}

impl DisplayFrame {
    /// The "no content" frame
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            item: None,
            cursor: 0,
            active_count: 0,
            generated_at,
        }
    }

    /// True when nothing is active and the viewer shows the idle screen
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }
}

/// Background loop computing display frames from the catalog
///
/// Construct it, keep a [`frames`](Self::frames) receiver, then hand the
/// service to a spawned task via [`run`](Self::run). The loop stops when
/// the task is aborted (server shutdown).
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vitrine_core::services::{CatalogService, PlaybackConfig, PlaybackService};
/// use vitrine_core::store::JsonFileStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let catalog = CatalogService::new(Arc::new(JsonFileStore::new("./data/content.json")));
///     let playback = PlaybackService::new(catalog, PlaybackConfig::default());
///
///     let mut frames = playback.frames();
///     tokio::spawn(playback.run());
///
///     frames.changed().await?;
///     println!("{:?}", frames.borrow().item);
///     Ok(())
/// }
/// ```
pub struct PlaybackService {
    catalog: CatalogService,
    config: PlaybackConfig,
    time: Arc<dyn TimeProvider>,
    frame_tx: watch::Sender<DisplayFrame>,
}

impl PlaybackService {
    /// Create a playback service on the system clock
    pub fn new(catalog: CatalogService, config: PlaybackConfig) -> Self {
        Self::with_time_provider(catalog, config, Arc::new(SystemTimeProvider))
    }

    /// Create a playback service with an injected clock
    pub fn with_time_provider(
        catalog: CatalogService,
        config: PlaybackConfig,
        time: Arc<dyn TimeProvider>,
    ) -> Self {
        let (frame_tx, _) = watch::channel(DisplayFrame::empty(time.now()));

        Self {
            catalog,
            config,
            time,
            frame_tx,
        }
    }

    /// Subscribe to published frames
    ///
    /// The receiver always holds the most recent frame, so a subscriber
    /// arriving between ticks still sees the current state immediately.
    pub fn frames(&self) -> watch::Receiver<DisplayFrame> {
        self.frame_tx.subscribe()
    }

    /// Run the playback loop until the driving task is dropped
    ///
    /// Subscribes to catalog events, loads the initial snapshot, publishes
    /// a first frame, and then reacts to rotation ticks, refresh ticks,
    /// and catalog events. Refresh failures are logged and the previous
    /// snapshot stays on screen.
    ///
    /// # Errors
    ///
    /// Returns an error only when the initial snapshot cannot be read.
    pub async fn run(self) -> Result<(), CatalogError> {
        tracing::info!(
            "Starting playback loop (rotation {:?}, refresh {:?})",
            self.config.rotation_interval,
            self.config.refresh_interval
        );

        // Subscribe before the initial load so no event can slip between
        // the snapshot and the first recv
        let mut events = self.catalog.subscribe_to_events();

        let mut items = self.catalog.list_items().await?;
        let mut rotation = Rotation::new();
        self.publish(&items, &mut rotation);

        let mut rotation_tick = interval_at(
            Instant::now() + self.config.rotation_interval,
            self.config.rotation_interval,
        );
        rotation_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut refresh_tick = interval_at(
            Instant::now() + self.config.refresh_interval,
            self.config.refresh_interval,
        );
        refresh_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = rotation_tick.tick() => {
                    let active = visibility::active_items(&items, self.time.now());
                    rotation.advance(active.len());
                    self.publish(&items, &mut rotation);
                }

                _ = refresh_tick.tick() => {
                    self.reload(&mut items).await;
                    self.publish(&items, &mut rotation);
                }

                event = events.recv() => {
                    match event {
                        Ok(event) => {
                            tracing::debug!(
                                "Playback refreshing after catalog event: {}",
                                event.event_type()
                            );
                            self.apply_event(&mut items, event);
                            self.publish(&items, &mut rotation);
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Missed events carry no lasting harm, the
                            // snapshot is rebuilt from the store
                            tracing::warn!(
                                "Playback lagged behind catalog events ({} skipped), reloading",
                                skipped
                            );
                            self.reload(&mut items).await;
                            self.publish(&items, &mut rotation);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Catalog event channel closed, stopping playback loop");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Fold a catalog event into the local snapshot.
    ///
    /// Events carry the affected item, so most changes apply without
    /// another store read; only an update to an item this snapshot has
    /// never seen forces a reload.
    fn apply_event(&self, items: &mut Vec<ContentItem>, event: CatalogEvent) {
        match event {
            CatalogEvent::ItemCreated(item) => items.push(item),
            CatalogEvent::ItemUpdated(updated) => {
                match items.iter_mut().find(|item| item.id == updated.id) {
                    Some(item) => *item = updated,
                    None => items.push(updated),
                }
            }
            CatalogEvent::ItemRemoved { id } => items.retain(|item| item.id != id),
            CatalogEvent::CollectionReplaced(replaced) => *items = replaced,
        }
    }

    /// Re-read the snapshot from the store, keeping the old one on failure
    async fn reload(&self, items: &mut Vec<ContentItem>) {
        match self.catalog.list_items().await {
            Ok(fresh) => *items = fresh,
            Err(e) => {
                tracing::warn!("Playback refresh failed, keeping previous snapshot: {}", e);
            }
        }
    }

    /// Evaluate visibility, clamp the cursor, and publish a frame
    fn publish(&self, items: &[ContentItem], rotation: &mut Rotation) {
        let now = self.time.now();
        let active = visibility::active_items(items, now);
        rotation.clamp(active.len());

        let frame = DisplayFrame {
            item: rotation
                .current(active.len())
                .and_then(|idx| active.get(idx).cloned()),
            cursor: rotation.cursor(),
            active_count: active.len(),
            generated_at: now,
        };
        self.frame_tx.send_replace(frame);
    }
}
