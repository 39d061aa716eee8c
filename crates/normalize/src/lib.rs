//! Text normalization for near-duplicate detection.
//!
//! [`normalize`] maps raw text to a canonical comparable form: lowercase,
//! non-alphanumeric characters collapsed to whitespace, whitespace runs
//! collapsed to a single space, ends trimmed. The result is deterministic
//! and idempotent: `normalize(normalize(x)) == normalize(x)`.

/// Canonicalize `text` for shingling and comparison.
///
/// 1. Maps every character to Unicode simple lowercase.
/// 2. Replaces every character that is not a letter, digit, or whitespace
///    with a single space.
/// 3. Collapses runs of whitespace to a single space and trims both ends.
pub fn normalize(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                mapped.push(lower);
            }
        } else {
            mapped.push(' ');
        }
    }
    collapse_spaces(&mapped)
}

/// Collapses runs of the ASCII space character to a single space and trims
/// both ends. `mapped` is expected to already have all whitespace and
/// punctuation reduced to `' '` by the caller.
fn collapse_spaces(mapped: &str) -> String {
    let mut out = String::with_capacity(mapped.len());
    let mut in_space = true; // trims leading space
    for c in mapped.chars() {
        if c == ' ' {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize("HELLO World"), "hello world");
    }

    #[test]
    fn strips_punctuation_to_space() {
        assert_eq!(normalize("Hello, world!"), "hello world");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("  a    b\t\nc  "), "a b c");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn only_punctuation_is_empty() {
        assert_eq!(normalize("!!! ,,, ???"), "");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("Room 101, Block B"), "room 101 block b");
    }

    #[test]
    fn unicode_lowercasing() {
        assert_eq!(normalize("CAFÉ"), "café");
    }

    #[test]
    fn idempotent() {
        let cases = [
            "The Quick Brown Fox!",
            "  weird    \t spacing\n",
            "already normal text",
            "",
            "MiXeD-case_with.punctuation",
        ];
        for c in cases {
            let once = normalize(c);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {c:?}");
        }
    }

    #[test]
    fn multibyte_does_not_panic_or_corrupt() {
        let out = normalize("naïve café—résumé 日本語");
        assert!(out.contains("na"));
        assert!(out.contains("日本語"));
    }
}
