//! Redb-backed persistence for documents, fingerprints, LSH buckets, and
//! comparison results.
//!
//! Four relations live in one redb file (default `data/<name>.db`), matching
//! the four tables of the system this was distilled from. `add_document`
//! writes the document, fingerprint, and every bucket row in a single write
//! transaction, so a reader never observes a partially-written document.
//! [`Store::rehydrate`] replays persisted bucket rows into a fresh
//! [`lshindex::LshIndex`] at startup.

mod codec;
mod error;
mod tables;
mod types;

use std::path::Path;

use chrono::{DateTime, Utc};
use lshindex::LshIndex;
use redb::{Database, ReadableTable};

pub use error::StoreError;
pub use types::{ComparisonResult, Document, DocumentSummary, Fingerprint};

use codec::{bucket_key, decode, encode, parse_bucket_key};
use tables::{COMPARISON_RESULTS, COUNTERS, DOCUMENTS, FINGERPRINTS, LSH_BUCKETS, LSH_BUCKETS_BY_DOC};

/// A handle onto one redb database file. `Send + Sync`; safe to share
/// across threads behind the orchestrator's own locking.
pub struct Store {
    db: Database,
}

impl Store {
    /// Open or create the database at `path`, ensuring every table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(StoreError::backend)?;
        let write_txn = db.begin_write().map_err(StoreError::backend)?;
        {
            let _ = write_txn.open_table(DOCUMENTS).map_err(StoreError::backend)?;
            let _ = write_txn.open_table(FINGERPRINTS).map_err(StoreError::backend)?;
            let _ = write_txn.open_table(LSH_BUCKETS).map_err(StoreError::backend)?;
            let _ = write_txn.open_table(LSH_BUCKETS_BY_DOC).map_err(StoreError::backend)?;
            let _ = write_txn.open_table(COMPARISON_RESULTS).map_err(StoreError::backend)?;
            let _ = write_txn.open_table(COUNTERS).map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(Self { db })
    }

    /// Persist a new document, its fingerprint, and its bucket rows in one
    /// write transaction. `band_buckets` is the set of `(band_id,
    /// bucket_hash)` pairs the signature falls into, as produced by
    /// [`lshindex::LshIndex::band_buckets`] — this crate does not depend on
    /// LSH hashing directly so the caller computes it.
    #[allow(clippy::too_many_arguments)]
    pub fn add_document(
        &self,
        title: String,
        author: Option<String>,
        filename: Option<String>,
        content: String,
        category: String,
        signature: &[u32],
        num_shingles: u32,
        band_buckets: &[(u32, String)],
        upload_date: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        let doc_id = Self::next_id(&write_txn, "next_document_id")?;
        let word_count = content.split_whitespace().count() as u32;
        let document = Document {
            id: doc_id,
            title,
            author,
            filename,
            content,
            word_count,
            upload_date,
            category,
        };
        let fingerprint = Fingerprint::new(doc_id, signature, num_shingles)?;

        {
            let mut docs = write_txn.open_table(DOCUMENTS).map_err(StoreError::backend)?;
            docs.insert(doc_id, encode(&document)?.as_slice()).map_err(StoreError::backend)?;

            let mut fps = write_txn.open_table(FINGERPRINTS).map_err(StoreError::backend)?;
            fps.insert(doc_id, encode(&fingerprint)?.as_slice()).map_err(StoreError::backend)?;

            let mut buckets = write_txn.open_table(LSH_BUCKETS).map_err(StoreError::backend)?;
            for (band_id, bucket_hash) in band_buckets {
                let key = bucket_key(*band_id, bucket_hash);
                let existing = buckets.get(key.as_str()).map_err(StoreError::backend)?;
                let mut ids: Vec<u64> = match existing {
                    Some(bytes) => decode(bytes.value())?,
                    None => Vec::new(),
                };
                if !ids.contains(&doc_id) {
                    ids.push(doc_id);
                }
                buckets
                    .insert(key.as_str(), encode(&ids)?.as_slice())
                    .map_err(StoreError::backend)?;
            }

            let mut by_doc = write_txn.open_table(LSH_BUCKETS_BY_DOC).map_err(StoreError::backend)?;
            by_doc
                .insert(doc_id, encode(&band_buckets.to_vec())?.as_slice())
                .map_err(StoreError::backend)?;
        }

        write_txn.commit().map_err(StoreError::backend)?;
        Ok(doc_id)
    }

    pub fn get_document(&self, id: u64) -> Result<Option<Document>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn.open_table(DOCUMENTS).map_err(StoreError::backend)?;
        match table.get(id).map_err(StoreError::backend)? {
            Some(bytes) => Ok(Some(decode(bytes.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_fingerprint(&self, id: u64) -> Result<Option<Fingerprint>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn.open_table(FINGERPRINTS).map_err(StoreError::backend)?;
        match table.get(id).map_err(StoreError::backend)? {
            Some(bytes) => Ok(Some(decode(bytes.value())?)),
            None => Ok(None),
        }
    }

    /// All documents, most recently uploaded first.
    pub fn list_documents(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn.open_table(DOCUMENTS).map_err(StoreError::backend)?;
        let mut out = Vec::new();
        for row in table.iter().map_err(StoreError::backend)? {
            let (_, value) = row.map_err(StoreError::backend)?;
            let doc: Document = decode(value.value())?;
            out.push(DocumentSummary::from(&doc));
        }
        out.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(out)
    }

    /// Cascade-delete a document's row, fingerprint, and bucket entries in
    /// one write transaction. Does not touch the in-memory LSH table; the
    /// caller removes `id` from its [`LshIndex`] after this returns `true`.
    pub fn delete_document(&self, id: u64) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        let removed;
        {
            let mut docs = write_txn.open_table(DOCUMENTS).map_err(StoreError::backend)?;
            removed = docs.remove(id).map_err(StoreError::backend)?.is_some();

            if removed {
                let mut fps = write_txn.open_table(FINGERPRINTS).map_err(StoreError::backend)?;
                fps.remove(id).map_err(StoreError::backend)?;

                let mut by_doc = write_txn.open_table(LSH_BUCKETS_BY_DOC).map_err(StoreError::backend)?;
                let removed_entry = by_doc.remove(id).map_err(StoreError::backend)?;
                let band_buckets: Vec<(u32, String)> = match removed_entry {
                    Some(bytes) => decode(bytes.value())?,
                    None => Vec::new(),
                };

                let mut buckets = write_txn.open_table(LSH_BUCKETS).map_err(StoreError::backend)?;
                for (band_id, bucket_hash) in &band_buckets {
                    let key = bucket_key(*band_id, bucket_hash);
                    let existing = buckets.get(key.as_str()).map_err(StoreError::backend)?;
                    let mut ids: Vec<u64> = match existing {
                        Some(bytes) => decode(bytes.value())?,
                        None => continue,
                    };
                    ids.retain(|&d| d != id);
                    if ids.is_empty() {
                        buckets.remove(key.as_str()).map_err(StoreError::backend)?;
                    } else {
                        buckets
                            .insert(key.as_str(), encode(&ids)?.as_slice())
                            .map_err(StoreError::backend)?;
                    }
                }
            }
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(removed)
    }

    /// Best-effort write of a diagnostic comparison row. Failures here must
    /// never fail the caller's `check` operation — callers should log and
    /// swallow the error.
    #[allow(clippy::too_many_arguments)]
    pub fn record_comparison(
        &self,
        query_document_id: Option<u64>,
        compared_document_id: u64,
        similarity_score: f64,
        matching_shingles: Option<u32>,
        comparison_date: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        let id = Self::next_id(&write_txn, "next_comparison_id")?;
        {
            let row = ComparisonResult {
                id,
                query_document_id,
                compared_document_id,
                similarity_score,
                matching_shingles,
                comparison_date,
            };
            let mut table = write_txn.open_table(COMPARISON_RESULTS).map_err(StoreError::backend)?;
            table.insert(id, encode(&row)?.as_slice()).map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(id)
    }

    /// Replay every persisted bucket row into `lsh`, restoring in-memory LSH
    /// state after process restart.
    pub fn rehydrate(&self, lsh: &LshIndex) -> Result<(), StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn.open_table(LSH_BUCKETS).map_err(StoreError::backend)?;
        for row in table.iter().map_err(StoreError::backend)? {
            let (key, value) = row.map_err(StoreError::backend)?;
            let (band_id, bucket_hash) = parse_bucket_key(key.value())
                .ok_or_else(|| StoreError::Decode(format!("malformed bucket key {:?}", key.value())))?;
            let doc_ids: Vec<u64> = decode(value.value())?;
            for doc_id in doc_ids {
                lsh.insert_raw(band_id as usize, bucket_hash.to_string(), doc_id)?;
            }
        }
        Ok(())
    }

    fn next_id(write_txn: &redb::WriteTransaction, counter_key: &str) -> Result<u64, StoreError> {
        let mut table = write_txn.open_table(COUNTERS).map_err(StoreError::backend)?;
        let current = table
            .get(counter_key)
            .map_err(StoreError::backend)?
            .map(|v| v.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(counter_key, next).map_err(StoreError::backend)?;
        Ok(next)
    }
}
