//! Character and word k-shingling over already-normalized text.
//!
//! [`shingles`] produces the character-level shingle set that feeds the
//! MinHash engine. [`word_shingles`] and [`split_words`] produce word-level
//! grams used by the fragment finder; they are not persisted and carry no
//! notion of a "signature".

use std::collections::HashSet;

/// Produce the set of character k-shingles of `normalized`.
///
/// If `normalized` has fewer than `k` characters (or `k == 0`), the result
/// is the single-element set `{ normalized }` so that trivial inputs still
/// match themselves. Otherwise every contiguous window of `k` characters is
/// collected into a set, collapsing duplicates.
pub fn shingles(normalized: &str, k: usize) -> HashSet<String> {
    let chars: Vec<char> = normalized.chars().collect();
    if k == 0 || chars.len() < k {
        return HashSet::from([normalized.to_string()]);
    }
    chars
        .windows(k)
        .map(|window| window.iter().collect::<String>())
        .collect()
}

/// Split already-normalized text into its whitespace-delimited words.
///
/// Normalized text uses a single ASCII space as its only separator, so this
/// is a plain split on `' '` with empty fragments discarded defensively.
pub fn split_words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Produce the ordered sequence of `k`-word grams of `normalized`.
///
/// Unlike [`shingles`], duplicates are not collapsed and order is
/// preserved: the fragment finder needs the grams aligned with their
/// position in the source text. Fewer than `k` words (or `k == 0`) yields
/// the whole word sequence joined as a single gram.
pub fn word_shingles(normalized: &str, k: usize) -> Vec<String> {
    let words = split_words(normalized);
    if words.is_empty() {
        return Vec::new();
    }
    if k == 0 || words.len() < k {
        return vec![words.join(" ")];
    }
    words.windows(k).map(|w| w.join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_yields_single_shingle() {
        let set = shingles("hi", 5);
        assert_eq!(set, HashSet::from(["hi".to_string()]));
    }

    #[test]
    fn exact_length_input_yields_single_shingle() {
        let set = shingles("abcde", 5);
        assert_eq!(set.len(), 1);
        assert!(set.contains("abcde"));
    }

    #[test]
    fn windows_count_matches_len_minus_k_plus_one() {
        let set = shingles("abcdefgh", 3);
        assert_eq!(set.len(), 6);
        assert!(set.contains("abc"));
        assert!(set.contains("fgh"));
    }

    #[test]
    fn duplicate_windows_collapse() {
        let set = shingles("aaaaaa", 3);
        assert_eq!(set, HashSet::from(["aaa".to_string()]));
    }

    #[test]
    fn empty_input() {
        let set = shingles("", 5);
        assert_eq!(set, HashSet::from([String::new()]));
    }

    #[test]
    fn zero_k_degenerates_to_whole_string() {
        let set = shingles("hello", 0);
        assert_eq!(set, HashSet::from(["hello".to_string()]));
    }

    #[test]
    fn multibyte_chars_are_not_split() {
        let set = shingles("日本語です", 2);
        assert!(set.contains("日本"));
        assert!(set.contains("です"));
    }

    #[test]
    fn split_words_basic() {
        assert_eq!(split_words("the quick brown fox"), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn split_words_empty() {
        assert!(split_words("").is_empty());
    }

    #[test]
    fn word_shingles_basic() {
        let grams = word_shingles("the quick brown fox jumps", 2);
        assert_eq!(
            grams,
            vec!["the quick", "quick brown", "brown fox", "fox jumps"]
        );
    }

    #[test]
    fn word_shingles_fewer_words_than_k() {
        let grams = word_shingles("only two", 5);
        assert_eq!(grams, vec!["only two"]);
    }

    #[test]
    fn word_shingles_empty_input() {
        assert!(word_shingles("", 3).is_empty());
    }
}
