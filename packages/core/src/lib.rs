//! Vitrine Core Content Layer
//!
//! This crate provides the content catalog, scheduling evaluation, and
//! persistence for the Vitrine digital-signage system.
//!
//! # Architecture
//!
//! - **Single JSON document**: The whole collection persists as one JSON
//!   array, rewritten on every change (last writer wins)
//! - **One write path**: All mutations go through `CatalogService`, which
//!   validates, saves, and broadcasts change events
//! - **Pure evaluation**: Visibility and rotation are side-effect-free
//!   functions over collection snapshots
//!
//! # Modules
//!
//! - [`models`] - Data structures (ContentItem, Content, drafts and patches)
//! - [`media`] - Data URI and YouTube link helpers
//! - [`services`] - Business services (CatalogService, PlaybackService, queries)
//! - [`store`] - Persistence layer (JSON file store, in-memory store)

pub mod media;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use models::*;
pub use services::*;
