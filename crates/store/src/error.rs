//! Errors produced by the persistence layer.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A redb operation failed (open, transaction, table access).
    #[error("store backend error: {0}")]
    Backend(String),

    /// A row failed to serialize for storage.
    #[error("encode error: {0}")]
    Encode(String),

    /// A stored row failed to deserialize.
    #[error("decode error: {0}")]
    Decode(String),

    /// The `signature_blob` JSON column failed to (de)serialize.
    #[error("signature json error: {0}")]
    Json(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<lshindex::LshError> for StoreError {
    fn from(e: lshindex::LshError) -> Self {
        StoreError::Backend(e.to_string())
    }
}
