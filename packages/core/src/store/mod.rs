//! Persistence Layer
//!
//! The content collection persists as a single JSON document, written
//! whole on every change (last writer wins). [`ContentStore`] is the
//! seam between the catalog and its backing storage; [`JsonFileStore`]
//! is the production implementation and [`MemoryStore`] backs tests.

pub mod content_store;
pub mod error;
pub mod json_store;
pub mod memory_store;

pub use content_store::ContentStore;
pub use error::StoreError;
pub use json_store::{JsonFileStore, DEFAULT_QUOTA_BYTES};
pub use memory_store::MemoryStore;
