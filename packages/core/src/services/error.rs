//! Service Layer Error Types
//!
//! This module defines error types for catalog operations, wrapping
//! validation and persistence failures with operation-level context.

use crate::models::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Catalog operation errors
///
/// Provides high-level error types for all catalog operations,
/// with detailed context and proper error chaining.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Content item not found by ID
    #[error("Content item not found: {id}")]
    ItemNotFound { id: String },

    /// Validation failed for a content item
    #[error("Content validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Persistence operation failed
    #[error("Store operation failed: {0}")]
    StoreFailed(#[from] StoreError),

    /// Reorder request does not match the stored collection
    #[error("Invalid reorder: {0}")]
    InvalidReorder(String),
}

impl CatalogError {
    /// Create an item not found error
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound { id: id.into() }
    }

    /// Create an invalid reorder error
    pub fn invalid_reorder(msg: impl Into<String>) -> Self {
        Self::InvalidReorder(msg.into())
    }
}
