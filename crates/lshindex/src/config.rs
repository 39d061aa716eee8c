//! Configuration for the banded LSH index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for LSH banding.
///
/// `num_bands * rows_per_band` must equal the `num_hashes` of the
/// [`minhash::MinhashConfig`] signatures this index is fed — that
/// cross-check is the caller's responsibility (see `orchestrator`'s
/// top-level config validation), since this crate has no dependency on
/// `minhash`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LshConfig {
    /// Number of bands (`B`).
    pub num_bands: usize,
    /// Rows per band (`R`).
    pub rows_per_band: usize,
}

impl Default for LshConfig {
    fn default() -> Self {
        Self {
            num_bands: 16,
            rows_per_band: 8,
        }
    }
}

impl LshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_bands(mut self, num_bands: usize) -> Self {
        self.num_bands = num_bands;
        self
    }

    pub fn with_rows_per_band(mut self, rows_per_band: usize) -> Self {
        self.rows_per_band = rows_per_band;
        self
    }

    /// Signature length this config expects (`B * R`).
    pub fn expected_signature_len(&self) -> usize {
        self.num_bands * self.rows_per_band
    }

    pub fn validate(&self) -> Result<(), LshError> {
        if self.num_bands == 0 {
            return Err(LshError::InvalidConfig("num_bands must be greater than zero".to_string()));
        }
        if self.rows_per_band == 0 {
            return Err(LshError::InvalidConfig("rows_per_band must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Errors produced by the LSH index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LshError {
    /// Configuration is not usable to build a band table.
    #[error("invalid lsh configuration: {0}")]
    InvalidConfig(String),

    /// A signature was presented whose length doesn't match `B * R`.
    #[error("signature length mismatch: expected {expected}, got {actual}")]
    SignatureLengthMismatch { expected: usize, actual: usize },

    /// The internal lock was poisoned by a panicking holder.
    #[error("lsh index lock poisoned")]
    Poisoned,
}
