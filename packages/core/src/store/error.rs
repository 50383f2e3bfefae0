//! Store Error Types
//!
//! Persistence failures are recoverable by design: callers surface them and
//! keep their in-memory state rather than treating them as fatal.

use thiserror::Error;

/// Errors from content collection persistence
#[derive(Error, Debug)]
pub enum StoreError {
    /// The serialized collection does not fit the storage quota
    #[error("Storage quota exceeded: collection needs {need} bytes, limit is {limit}")]
    QuotaExceeded { need: usize, limit: usize },

    /// The collection could not be serialized
    #[error("Failed to serialize content collection: {0}")]
    SerializationFailure(String),

    /// Reading or writing the backing storage failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a quota exceeded error
    pub fn quota_exceeded(need: usize, limit: usize) -> Self {
        Self::QuotaExceeded { need, limit }
    }

    /// Create a serialization failure error
    pub fn serialization_failure(msg: impl Into<String>) -> Self {
        Self::SerializationFailure(msg.into())
    }
}
