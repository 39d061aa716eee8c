//! Configuration for the MinHash engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for MinHash signature construction.
///
/// `num_hashes` is `H` in the design: the fixed width of every signature.
/// The same `seed` must be used for every signature ever compared, since it
/// determines the `(a, b)` coefficient table the universal hash family is
/// built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinhashConfig {
    /// Number of hash functions (signature width, `H`).
    pub num_hashes: usize,
    /// Seed for the deterministic coefficient generator.
    pub seed: u64,
    /// Whether to compute signature slots in parallel via rayon.
    pub use_parallel: bool,
}

impl Default for MinhashConfig {
    fn default() -> Self {
        Self {
            num_hashes: 128,
            seed: 42,
            use_parallel: false,
        }
    }
}

impl MinhashConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate the configuration, returning the specific violated
    /// constraint on failure.
    pub fn validate(&self) -> Result<(), MinhashError> {
        if self.num_hashes == 0 {
            return Err(MinhashError::InvalidConfig(
                "num_hashes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors produced by the MinHash engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MinhashError {
    /// Two signatures were compared with differing lengths.
    #[error("signature length mismatch: expected {expected}, got {actual}")]
    InvalidSignature { expected: usize, actual: usize },

    /// Configuration is not usable to construct a hash-coefficient table.
    #[error("invalid minhash configuration: {0}")]
    InvalidConfig(String),
}
