//! Redb table definitions for the four persisted relations plus id counters.

use redb::TableDefinition;

/// `documents(id -> bincode Document)`.
pub const DOCUMENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("documents");

/// `fingerprints(document_id -> bincode Fingerprint)`.
pub const FINGERPRINTS: TableDefinition<u64, &[u8]> = TableDefinition::new("fingerprints");

/// `lsh_buckets("{band_id}:{bucket_hash}" -> bincode Vec<document_id>)`.
pub const LSH_BUCKETS: TableDefinition<&str, &[u8]> = TableDefinition::new("lsh_buckets");

/// Secondary index: `document_id -> bincode Vec<(band_id, bucket_hash)>`,
/// making cascade delete O(bands) instead of a full `lsh_buckets` scan.
pub const LSH_BUCKETS_BY_DOC: TableDefinition<u64, &[u8]> = TableDefinition::new("lsh_buckets_by_doc");

/// `comparison_results(id -> bincode ComparisonResult)`.
pub const COMPARISON_RESULTS: TableDefinition<u64, &[u8]> = TableDefinition::new("comparison_results");

/// Monotonic id counters, keyed by name (`"next_document_id"`, `"next_comparison_id"`).
pub const COUNTERS: TableDefinition<&str, u64> = TableDefinition::new("counters");
