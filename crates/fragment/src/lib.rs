//! Longest-common-fragment extraction between two texts.
//!
//! Both texts are normalized and split into word sequences. For every start
//! index in the first document's words, a window is grown word-by-word as
//! long as it still occurs as a literal substring of the second document's
//! (space-joined) normalized text. Overlapping candidates are then resolved
//! greedily, longest first.

mod config;

use normalize::normalize;
use shingle::split_words;

pub use config::{FragmentConfig, FragmentError};

/// One matched overlapping run of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Word offset into the first document's word sequence.
    pub position_doc1: usize,
    /// Character offset into the second document's space-joined word sequence.
    pub position_doc2: usize,
    /// Length of the fragment in words.
    pub length: usize,
}

/// Find overlapping word-runs between `doc1` and `doc2`, longest first,
/// with non-overlapping coverage of `doc1`'s words.
pub fn find_matching_fragments(doc1: &str, doc2: &str, cfg: &FragmentConfig) -> Result<Vec<Fragment>, FragmentError> {
    cfg.validate()?;

    let normalized1 = normalize(doc1);
    let normalized2 = normalize(doc2);
    let words1 = split_words(&normalized1);
    let words2 = split_words(&normalized2);
    if words1.is_empty() || words2.is_empty() {
        return Ok(Vec::new());
    }
    let text2 = words2.join(" ");

    let mut candidates = Vec::new();
    let mut start = 0;
    while start + cfg.window_words <= words1.len() {
        let window = words1[start..start + cfg.window_words].join(" ");
        if let Some(position_doc2) = text2.find(&window) {
            let mut end = start + cfg.window_words;
            let mut last_text = window;
            let mut last_position_doc2 = position_doc2;
            while end < words1.len() {
                let extended = words1[start..end + 1].join(" ");
                match text2.find(&extended) {
                    Some(pos) => {
                        last_text = extended;
                        last_position_doc2 = pos;
                        end += 1;
                    }
                    None => break,
                }
            }
            if last_text.chars().count() >= cfg.min_chars {
                candidates.push(Fragment {
                    text: last_text,
                    position_doc1: start,
                    position_doc2: last_position_doc2,
                    length: end - start,
                });
            }
        }
        start += 1;
    }

    candidates.sort_by(|a, b| b.length.cmp(&a.length).then(a.position_doc1.cmp(&b.position_doc1)));

    let mut used = vec![false; words1.len()];
    let mut accepted = Vec::new();
    for candidate in candidates {
        let span = candidate.position_doc1..candidate.position_doc1 + candidate.length;
        if span.clone().all(|i| !used[i]) {
            for i in span {
                used[i] = true;
            }
            accepted.push(candidate);
        }
    }
    Ok(accepted)
}
