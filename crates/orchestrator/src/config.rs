//! Top-level configuration for the orchestrator, loadable from YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All knobs needed to construct an [`crate::Orchestrator`].
///
/// `num_bands * rows_per_band` must equal `num_hashes`; this is checked in
/// [`OrchestratorConfig::validate`] rather than left to `minhash`/`lshindex`,
/// since it is a cross-crate constraint neither of those crates can see on
/// their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrchestratorConfig {
    pub shingle_size: usize,
    pub num_hashes: usize,
    pub num_bands: usize,
    pub rows_per_band: usize,
    pub minhash_seed: u64,
    pub minhash_use_parallel: bool,
    pub refine_threshold: f64,
    pub fragment_min_chars: usize,
    pub fragment_window_words: usize,
    pub top_k: usize,
    pub store_location: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            shingle_size: 5,
            num_hashes: 128,
            num_bands: 16,
            rows_per_band: 8,
            minhash_seed: 42,
            minhash_use_parallel: false,
            refine_threshold: 0.3,
            fragment_min_chars: 30,
            fragment_window_words: 5,
            top_k: 5,
            store_location: "data/simtext.db".to_string(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shingle_size(mut self, shingle_size: usize) -> Self {
        self.shingle_size = shingle_size;
        self
    }

    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_num_bands(mut self, num_bands: usize) -> Self {
        self.num_bands = num_bands;
        self
    }

    pub fn with_rows_per_band(mut self, rows_per_band: usize) -> Self {
        self.rows_per_band = rows_per_band;
        self
    }

    pub fn with_minhash_seed(mut self, seed: u64) -> Self {
        self.minhash_seed = seed;
        self
    }

    pub fn with_refine_threshold(mut self, refine_threshold: f64) -> Self {
        self.refine_threshold = refine_threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_store_location<S: Into<String>>(mut self, store_location: S) -> Self {
        self.store_location = store_location.into();
        self
    }

    /// Load configuration from a YAML file, then validate it.
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("{}: {e}", path.as_ref().display())))?;
        let cfg: Self = serde_yaml::from_str(&text).map_err(|e| ConfigError::YamlParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shingle_size == 0 {
            return Err(ConfigError::Validation("shingle_size must be greater than zero".to_string()));
        }
        if self.num_hashes == 0 {
            return Err(ConfigError::Validation("num_hashes must be greater than zero".to_string()));
        }
        if self.num_bands == 0 || self.rows_per_band == 0 {
            return Err(ConfigError::Validation("num_bands and rows_per_band must be greater than zero".to_string()));
        }
        if self.num_bands * self.rows_per_band != self.num_hashes {
            return Err(ConfigError::Validation(format!(
                "num_bands * rows_per_band ({}) must equal num_hashes ({})",
                self.num_bands * self.rows_per_band,
                self.num_hashes
            )));
        }
        if !(0.0..=1.0).contains(&self.refine_threshold) {
            return Err(ConfigError::Validation("refine_threshold must be in [0, 1]".to_string()));
        }
        if self.fragment_min_chars == 0 {
            return Err(ConfigError::Validation("fragment_min_chars must be greater than zero".to_string()));
        }
        if self.fragment_window_words == 0 {
            return Err(ConfigError::Validation("fragment_window_words must be greater than zero".to_string()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Validation("top_k must be greater than zero".to_string()));
        }
        if self.store_location.trim().is_empty() {
            return Err(ConfigError::Validation("store_location must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Errors produced while loading or validating an [`OrchestratorConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),

    #[error("failed to parse yaml config: {0}")]
    YamlParse(String),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(OrchestratorConfig::default().validate().is_ok());
    }

    #[test]
    fn bands_times_rows_must_equal_num_hashes() {
        let cfg = OrchestratorConfig::new().with_num_bands(16).with_rows_per_band(7);
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn refine_threshold_out_of_range_rejected() {
        let cfg = OrchestratorConfig::new().with_refine_threshold(1.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_top_k_rejected() {
        let cfg = OrchestratorConfig::new().with_top_k(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_yaml_file_reports_file_read_error() {
        let err = OrchestratorConfig::from_yaml_path("/nonexistent/path.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }

    #[test]
    fn loads_from_yaml_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "shingle_size: 5\nnum_hashes: 128\nnum_bands: 16\nrows_per_band: 8\nminhash_seed: 42\nminhash_use_parallel: false\nrefine_threshold: 0.3\nfragment_min_chars: 30\nfragment_window_words: 5\ntop_k: 5\nstore_location: data/test.db\n",
        )
        .unwrap();
        let cfg = OrchestratorConfig::from_yaml_path(&path).unwrap();
        assert_eq!(cfg.num_hashes, 128);
    }
}
