//! The `check` operation's output shape.

use serde::Serialize;

/// One matched fragment, echoed into the report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FragmentMatch {
    pub text: String,
    pub position_doc1: usize,
    pub position_doc2: usize,
    pub length: usize,
}

impl From<fragment::Fragment> for FragmentMatch {
    fn from(f: fragment::Fragment) -> Self {
        Self {
            text: f.text,
            position_doc1: f.position_doc1,
            position_doc2: f.position_doc2,
            length: f.length,
        }
    }
}

/// One candidate document that survived exact-Jaccard refinement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimilarDocument {
    pub document_id: u64,
    pub title: String,
    pub author: Option<String>,
    /// Exact Jaccard similarity, in percentage points, rounded to 2 decimals.
    pub similarity: f64,
    pub matching_fragments: Vec<FragmentMatch>,
}

/// The result of `check`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    /// `100 - max(similarity)` over `similar_documents`, or `100.0` if empty.
    pub uniqueness_score: f64,
    pub total_documents_checked: usize,
    pub candidates_found: usize,
    pub similar_documents: Vec<SimilarDocument>,
    /// The top result's fragments, echoed at top level; empty if no result.
    pub matching_fragments: Vec<FragmentMatch>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(33.33333), 33.33);
        assert_eq!(round2(100.0), 100.0);
    }
}
