//! Data Models
//!
//! This module contains the core data structures used throughout Vitrine:
//!
//! - `ContentItem` - A scheduled piece of signage content
//! - `Content` - The tagged payload variant (image/webpage/text/video)
//! - `ContentDraft` / `ContentPatch` - Validated create and update inputs
//! - `TimeProvider` - Clock abstraction for deterministic scheduling tests

mod item;
pub mod time;

pub use item::{
    Content, ContentDraft, ContentItem, ContentKind, ContentPatch, MediaSource, ValidationError,
};
pub(crate) use item::deserialize_opt_instant;
pub use time::{SystemTimeProvider, TimeProvider};
