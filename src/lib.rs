//! Near-duplicate text detection via shingling, MinHash signatures, and LSH.
//!
//! This crate is a thin re-export of [`orchestrator`], the crate that
//! composes normalization, shingling, MinHash, LSH, persistence, and
//! fragment extraction into `add`/`check`/`list`/`delete`. See
//! [`Orchestrator`] for the entry point.

pub use orchestrator::{ConfigError, FragmentMatch, Orchestrator, OrchestratorConfig, OrchestratorError, Report, SimilarDocument};
pub use store::DocumentSummary;
