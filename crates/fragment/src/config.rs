//! Configuration for fragment extraction.

use thiserror::Error;

/// Configuration for [`crate::find_matching_fragments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentConfig {
    /// Minimum character length of a reported fragment.
    pub min_chars: usize,
    /// Initial word-window size a candidate match starts from.
    pub window_words: usize,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            min_chars: 30,
            window_words: 5,
        }
    }
}

impl FragmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn with_window_words(mut self, window_words: usize) -> Self {
        self.window_words = window_words;
        self
    }

    pub fn validate(&self) -> Result<(), FragmentError> {
        if self.min_chars == 0 {
            return Err(FragmentError::InvalidConfig("min_chars must be greater than zero".to_string()));
        }
        if self.window_words == 0 {
            return Err(FragmentError::InvalidConfig("window_words must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Errors produced by fragment extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FragmentError {
    #[error("invalid fragment configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FragmentConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_min_chars_rejected() {
        assert!(FragmentConfig::new().with_min_chars(0).validate().is_err());
    }

    #[test]
    fn zero_window_words_rejected() {
        assert!(FragmentConfig::new().with_window_words(0).validate().is_err());
    }
}
