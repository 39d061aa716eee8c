//! Aggregated error type for the orchestrator.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OrchestratorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("minhash error: {0}")]
    Minhash(#[from] minhash::MinhashError),

    #[error("lsh error: {0}")]
    Lsh(#[from] lshindex::LshError),

    #[error("fragment error: {0}")]
    Fragment(#[from] fragment::FragmentError),
}
