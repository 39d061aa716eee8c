//! MinHash signature construction and Jaccard estimation.
//!
//! A [`MinhashEngine`] is constructed once from a [`MinhashConfig`] and
//! reused for every document: the `(a, b)` coefficient table it holds is
//! immutable and shared, as required for signatures to remain comparable
//! across the lifetime of a corpus. [`estimate`] then compares any two
//! signatures produced by engines sharing the same `num_hashes`.
//!
//! ```
//! use std::collections::HashSet;
//! use minhash::{MinhashConfig, MinhashEngine};
//!
//! let engine = MinhashEngine::new(MinhashConfig::default()).unwrap();
//! let shingles: HashSet<String> = ["hello", "world"].iter().map(|s| s.to_string()).collect();
//! let sig = engine.signature(&shingles);
//! assert_eq!(sig.len(), 128);
//! ```

mod config;
mod params;
mod signature;

use std::collections::HashSet;

pub use config::{MinhashConfig, MinhashError};
pub use params::{HashParams, MOD_PRIME};
pub use signature::{estimate, h0, signature as compute_signature};

/// A constructed MinHash engine: validated configuration plus its
/// deterministic coefficient table.
#[derive(Debug, Clone)]
pub struct MinhashEngine {
    cfg: MinhashConfig,
    params: HashParams,
}

impl MinhashEngine {
    /// Validate `cfg` and build the coefficient table.
    pub fn new(cfg: MinhashConfig) -> Result<Self, MinhashError> {
        cfg.validate()?;
        let params = HashParams::new(&cfg);
        Ok(Self { cfg, params })
    }

    /// Compute the signature of a shingle set under this engine's config.
    pub fn signature(&self, shingles: &HashSet<String>) -> Vec<u32> {
        compute_signature(shingles, &self.params, &self.cfg)
    }

    /// Signature width (`H`).
    pub fn num_hashes(&self) -> usize {
        self.cfg.num_hashes
    }

    pub fn config(&self) -> &MinhashConfig {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_rejects_invalid_config() {
        let cfg = MinhashConfig::new().with_num_hashes(0);
        assert!(MinhashEngine::new(cfg).is_err());
    }

    #[test]
    fn engine_signature_matches_free_function() {
        let cfg = MinhashConfig::default();
        let engine = MinhashEngine::new(cfg.clone()).unwrap();
        let shingles: HashSet<String> = ["abcde", "bcdef"].iter().map(|s| s.to_string()).collect();
        let params = HashParams::new(&cfg);
        assert_eq!(engine.signature(&shingles), compute_signature(&shingles, &params, &cfg));
    }
}
