//! Row types for the four persisted relations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A stored document. Never mutated after `add`; destroyed by `delete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub author: Option<String>,
    pub filename: Option<String>,
    pub content: String,
    pub word_count: u32,
    pub upload_date: DateTime<Utc>,
    pub category: String,
}

/// Summary view returned by `list`, without the full document body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    pub id: u64,
    pub title: String,
    pub author: Option<String>,
    pub category: String,
    pub upload_date: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title.clone(),
            author: doc.author.clone(),
            category: doc.category.clone(),
            upload_date: doc.upload_date,
        }
    }
}

/// One fingerprint per document. `signature_blob` is a JSON array of the
/// signature's `u32` slots, kept human-inspectable per the on-disk format
/// contract even though the row itself is bincode-encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fingerprint {
    pub document_id: u64,
    pub signature_blob: String,
    pub num_shingles: u32,
}

impl Fingerprint {
    pub fn new(document_id: u64, signature: &[u32], num_shingles: u32) -> Result<Self, StoreError> {
        let signature_blob = serde_json::to_string(signature).map_err(|e| StoreError::Json(e.to_string()))?;
        Ok(Self {
            document_id,
            signature_blob,
            num_shingles,
        })
    }

    pub fn signature(&self) -> Result<Vec<u32>, StoreError> {
        serde_json::from_str(&self.signature_blob).map_err(|e| StoreError::Json(e.to_string()))
    }
}

/// A write-through diagnostic row. Never authoritative; never read back by
/// the core to answer `check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub id: u64,
    pub query_document_id: Option<u64>,
    pub compared_document_id: u64,
    pub similarity_score: f64,
    pub matching_shingles: Option<u32>,
    pub comparison_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_signature_round_trips() {
        let fp = Fingerprint::new(1, &[1, 2, 3, 4], 10).unwrap();
        assert_eq!(fp.signature().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn summary_copies_document_fields() {
        let doc = Document {
            id: 1,
            title: "T".to_string(),
            author: Some("A".to_string()),
            filename: None,
            content: "c".to_string(),
            word_count: 1,
            upload_date: Utc::now(),
            category: "uncategorized".to_string(),
        };
        let summary = DocumentSummary::from(&doc);
        assert_eq!(summary.id, doc.id);
        assert_eq!(summary.title, doc.title);
    }
}
