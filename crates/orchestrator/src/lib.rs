//! Composes normalization, shingling, MinHash, LSH, persistence, and
//! fragment extraction into the four public operations: `add`, `check`,
//! `list`, `delete`.
//!
//! `add` and `delete` are serialized against each other and against the
//! in-memory LSH table behind a single [`Mutex`]; `check` only reads. This
//! mirrors the teacher's coarse-grained locking choice (one lock around the
//! whole index rather than per-bucket locks) and its `ingest::ingest`
//! span-and-log-elapsed pattern for every operation.

mod config;
mod error;
mod report;

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn, Level};

use fragment::{find_matching_fragments, FragmentConfig};
use lshindex::{LshConfig, LshIndex};
use minhash::{MinhashConfig, MinhashEngine};
use normalize::normalize;
use shingle::shingles;
use store::{DocumentSummary, Store};

pub use config::{ConfigError, OrchestratorConfig};
pub use error::OrchestratorError;
pub use report::{FragmentMatch, Report, SimilarDocument};

use report::round2;

/// A running instance bound to one persistent store file.
pub struct Orchestrator {
    cfg: OrchestratorConfig,
    minhash: MinhashEngine,
    lsh: LshIndex,
    store: Store,
    write_lock: Mutex<()>,
}

impl Orchestrator {
    /// Validate `cfg`, open (or create) its store, and rehydrate the
    /// in-memory LSH table from any persisted bucket rows.
    pub fn open(cfg: OrchestratorConfig) -> Result<Self, OrchestratorError> {
        cfg.validate()?;
        let minhash = MinhashEngine::new(
            MinhashConfig::new()
                .with_num_hashes(cfg.num_hashes)
                .with_seed(cfg.minhash_seed)
                .with_parallel(cfg.minhash_use_parallel),
        )?;
        let lsh = LshIndex::new(LshConfig::new().with_num_bands(cfg.num_bands).with_rows_per_band(cfg.rows_per_band))?;
        let store = Store::open(&cfg.store_location)?;
        store.rehydrate(&lsh)?;
        Ok(Self {
            cfg,
            minhash,
            lsh,
            store,
            write_lock: Mutex::new(()),
        })
    }

    /// Persist a new document and index it. Atomic: if LSH indexing fails
    /// after the document is persisted, the persisted row is rolled back.
    pub fn add(
        &self,
        title: String,
        content: String,
        author: Option<String>,
        filename: Option<String>,
        category: Option<String>,
    ) -> Result<u64, OrchestratorError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "orchestrator.add", title = %title);
        let _guard = span.enter();
        let _lock = self.write_lock.lock().expect("orchestrator write lock poisoned");

        match self.add_inner(title, content, author, filename, category) {
            Ok(doc_id) => {
                let elapsed_micros = start.elapsed().as_micros();
                info!(document_id = doc_id, elapsed_micros, "orchestrator_add_success");
                Ok(doc_id)
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                warn!(error = %err, elapsed_micros, "orchestrator_add_failure");
                Err(err)
            }
        }
    }

    fn add_inner(
        &self,
        title: String,
        content: String,
        author: Option<String>,
        filename: Option<String>,
        category: Option<String>,
    ) -> Result<u64, OrchestratorError> {
        let normalized = normalize(&content);
        let shingle_set = shingles(&normalized, self.cfg.shingle_size);
        let num_shingles = shingle_set.len() as u32;
        let signature = self.minhash.signature(&shingle_set);
        let band_buckets = self.lsh.band_buckets(&signature)?;
        let category = category.unwrap_or_else(|| "uncategorized".to_string());

        let doc_id = self
            .store
            .add_document(title, author, filename, content, category, &signature, num_shingles, &band_buckets, Utc::now())?;

        if let Err(err) = self.lsh.index(doc_id, &signature) {
            let _ = self.store.delete_document(doc_id);
            return Err(err.into());
        }
        Ok(doc_id)
    }

    /// Compute a uniqueness report for `content` against the corpus.
    pub fn check(&self, content: &str, top_k: Option<usize>) -> Result<Report, OrchestratorError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "orchestrator.check");
        let _guard = span.enter();

        match self.check_inner(content, top_k) {
            Ok(report) => {
                let elapsed_micros = start.elapsed().as_micros();
                info!(
                    candidates_found = report.candidates_found,
                    uniqueness_score = report.uniqueness_score,
                    elapsed_micros,
                    "orchestrator_check_success"
                );
                Ok(report)
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                warn!(error = %err, elapsed_micros, "orchestrator_check_failure");
                Err(err)
            }
        }
    }

    fn check_inner(&self, content: &str, top_k: Option<usize>) -> Result<Report, OrchestratorError> {
        let top_k = top_k.unwrap_or(self.cfg.top_k);
        let normalized = normalize(content);
        let query_shingles = shingles(&normalized, self.cfg.shingle_size);
        let signature = self.minhash.signature(&query_shingles);

        let candidate_ids = self.lsh.candidates(&signature)?;
        let candidates_found = candidate_ids.len();
        let total_documents_checked = self.store.list_documents()?.len();

        let mut similar_documents = Vec::new();
        for candidate_id in candidate_ids {
            let Some(document) = self.store.get_document(candidate_id)? else {
                continue;
            };
            let Some(fingerprint) = self.store.get_fingerprint(candidate_id)? else {
                continue;
            };
            let candidate_signature = fingerprint.signature()?;
            let estimate = minhash::estimate(&signature, &candidate_signature)?;

            let (similarity_score, matching_shingles, fragments) = if estimate > self.cfg.refine_threshold {
                let candidate_normalized = normalize(&document.content);
                let candidate_shingles = shingles(&candidate_normalized, self.cfg.shingle_size);
                let (exact, matching) = exact_jaccard(&query_shingles, &candidate_shingles);
                let fragment_cfg = FragmentConfig::new()
                    .with_min_chars(self.cfg.fragment_min_chars)
                    .with_window_words(self.cfg.fragment_window_words);
                let fragments = find_matching_fragments(content, &document.content, &fragment_cfg)?;
                (round2(exact * 100.0), Some(matching), fragments)
            } else {
                (round2(estimate * 100.0), None, Vec::new())
            };

            if let Err(err) = self
                .store
                .record_comparison(None, candidate_id, similarity_score, matching_shingles, Utc::now())
            {
                warn!(error = %err, document_id = candidate_id, "orchestrator_comparison_record_failed");
            }

            if matching_shingles.is_some() {
                similar_documents.push(SimilarDocument {
                    document_id: document.id,
                    title: document.title,
                    author: document.author,
                    similarity: similarity_score,
                    matching_fragments: fragments.into_iter().take(5).map(FragmentMatch::from).collect(),
                });
            }
        }

        similar_documents.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal));
        similar_documents.truncate(top_k);

        let max_similarity = similar_documents.first().map(|d| d.similarity).unwrap_or(0.0);
        let uniqueness_score = round2(100.0 - max_similarity);
        let matching_fragments = similar_documents.first().map(|d| d.matching_fragments.clone()).unwrap_or_default();

        Ok(Report {
            uniqueness_score,
            total_documents_checked,
            candidates_found,
            similar_documents,
            matching_fragments,
        })
    }

    /// All documents, most recently uploaded first.
    pub fn list(&self) -> Result<Vec<DocumentSummary>, OrchestratorError> {
        Ok(self.store.list_documents()?)
    }

    /// Cascade-delete a document from the store and the in-memory LSH.
    pub fn delete(&self, id: u64) -> Result<bool, OrchestratorError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "orchestrator.delete", document_id = id);
        let _guard = span.enter();
        let _lock = self.write_lock.lock().expect("orchestrator write lock poisoned");

        let result = (|| -> Result<bool, OrchestratorError> {
            let removed = self.store.delete_document(id)?;
            if removed {
                self.lsh.remove(id)?;
            }
            Ok(removed)
        })();

        let elapsed_micros = start.elapsed().as_micros();
        match &result {
            Ok(removed) => info!(removed, elapsed_micros, "orchestrator_delete_success"),
            Err(err) => warn!(error = %err, elapsed_micros, "orchestrator_delete_failure"),
        }
        result
    }
}

/// Exact Jaccard similarity and intersection size between two shingle sets.
fn exact_jaccard(a: &HashSet<String>, b: &HashSet<String>) -> (f64, u32) {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    let score = if union == 0 { 0.0 } else { intersection as f64 / union as f64 };
    (score, intersection as u32)
}
