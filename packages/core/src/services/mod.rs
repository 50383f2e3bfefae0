//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `CatalogService` - validated writes over the content collection, with change events
//! - `PlaybackService` - background loop computing display frames for the viewer
//! - `ContentQuery` - filtering and sorting for the manager list views
//! - `visibility` - pure active-subset evaluation
//! - `Rotation` - round-robin cursor arithmetic
//!
//! Services coordinate between the persistence layer and the HTTP surface,
//! implementing the scheduling rules and serializing all writes through
//! one choke point.

pub mod catalog;
pub mod error;
pub mod events;
pub mod playback;
pub mod query;
pub mod rotation;
pub mod visibility;

pub use catalog::CatalogService;
pub use error::CatalogError;
pub use events::CatalogEvent;
pub use playback::{DisplayFrame, PlaybackConfig, PlaybackService};
pub use query::{ContentQuery, SortDirection, SortKey};
pub use rotation::Rotation;
