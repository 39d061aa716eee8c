//! Signature construction and Jaccard estimation.

use std::collections::HashSet;

use md5::{Digest, Md5};
use rayon::prelude::*;

use crate::config::{MinhashConfig, MinhashError};
use crate::params::{HashParams, MOD_PRIME};

/// Reduce a shingle to a 32-bit integer via MD5.
///
/// Matches the common `int(md5(shingle).hexdigest(), 16) mod 2^32` idiom:
/// the digest is a 128-bit big-endian integer, and reducing it mod `2^32`
/// keeps its low-order 32 bits, i.e. the last four bytes of the digest.
pub fn h0(shingle: &str) -> u32 {
    let digest = Md5::digest(shingle.as_bytes());
    u32::from_be_bytes([digest[12], digest[13], digest[14], digest[15]])
}

/// Compute the MinHash signature of a shingle set.
///
/// An empty shingle set yields a signature of all `u32::MAX` (the slot
/// initialization value, never beaten by any real hash).
pub fn signature(shingles: &HashSet<String>, params: &HashParams, cfg: &MinhashConfig) -> Vec<u32> {
    if shingles.is_empty() {
        return vec![u32::MAX; params.len()];
    }
    let hashes: Vec<u64> = shingles.iter().map(|s| h0(s) as u64).collect();

    let compute_slot = |i: usize| -> u32 {
        let a = params.a[i];
        let b = params.b[i];
        hashes
            .iter()
            .map(|&h| ((a.wrapping_mul(h).wrapping_add(b)) % MOD_PRIME) as u32)
            .min()
            .expect("hashes is non-empty because shingles is non-empty")
    };

    if cfg.use_parallel {
        (0..params.len()).into_par_iter().map(compute_slot).collect()
    } else {
        (0..params.len()).map(compute_slot).collect()
    }
}

/// Estimate the Jaccard similarity of two documents from their signatures:
/// the fraction of slots at which they agree.
///
/// Fails with [`MinhashError::InvalidSignature`] if the two signatures do
/// not have equal length — two signatures produced by engines with
/// different `num_hashes` are not comparable.
pub fn estimate(a: &[u32], b: &[u32]) -> Result<f64, MinhashError> {
    if a.len() != b.len() {
        return Err(MinhashError::InvalidSignature {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let equal = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    Ok(equal as f64 / a.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shingle_set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn h0_is_deterministic() {
        assert_eq!(h0("hello"), h0("hello"));
    }

    #[test]
    fn h0_differs_for_different_inputs() {
        assert_ne!(h0("hello"), h0("world"));
    }

    #[test]
    fn empty_shingles_yields_all_max_signature() {
        let cfg = MinhashConfig::default();
        let params = HashParams::new(&cfg);
        let sig = signature(&HashSet::new(), &params, &cfg);
        assert_eq!(sig.len(), cfg.num_hashes);
        assert!(sig.iter().all(|&v| v == u32::MAX));
    }

    #[test]
    fn signature_length_matches_num_hashes() {
        let cfg = MinhashConfig::default().with_num_hashes(64);
        let params = HashParams::new(&cfg);
        let sig = signature(&shingle_set(&["abcde", "bcdef", "cdefg"]), &params, &cfg);
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn signature_is_deterministic() {
        let cfg = MinhashConfig::default();
        let params = HashParams::new(&cfg);
        let shingles = shingle_set(&["abcde", "bcdef", "cdefg", "defgh"]);
        let sig1 = signature(&shingles, &params, &cfg);
        let sig2 = signature(&shingles, &params, &cfg);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn parallel_matches_sequential() {
        let shingles = shingle_set(&["abcde", "bcdef", "cdefg", "defgh", "efghi"]);
        let seq_cfg = MinhashConfig::default().with_parallel(false);
        let par_cfg = MinhashConfig::default().with_parallel(true);
        let params = HashParams::new(&seq_cfg);
        assert_eq!(
            signature(&shingles, &params, &seq_cfg),
            signature(&shingles, &params, &par_cfg)
        );
    }

    #[test]
    fn identical_shingle_sets_estimate_to_one() {
        let cfg = MinhashConfig::default();
        let params = HashParams::new(&cfg);
        let shingles = shingle_set(&["abcde", "bcdef", "cdefg"]);
        let sig = signature(&shingles, &params, &cfg);
        assert_eq!(estimate(&sig, &sig).unwrap(), 1.0);
    }

    #[test]
    fn disjoint_shingle_sets_estimate_lower_than_shared() {
        let cfg = MinhashConfig::default();
        let params = HashParams::new(&cfg);
        let a = shingle_set(&["abcde", "bcdef", "cdefg", "defgh"]);
        let b = shingle_set(&["zzzzz", "yyyyy", "xxxxx", "wwwww"]);
        let sig_a = signature(&a, &params, &cfg);
        let sig_b = signature(&b, &params, &cfg);
        let est_disjoint = estimate(&sig_a, &sig_b).unwrap();

        let c = shingle_set(&["abcde", "bcdef", "qqqqq", "rrrrr"]);
        let sig_c = signature(&c, &params, &cfg);
        let est_shared = estimate(&sig_a, &sig_c).unwrap();

        assert!(est_shared >= est_disjoint);
    }

    #[test]
    fn mismatched_lengths_reject() {
        let err = estimate(&[1, 2, 3], &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            MinhashError::InvalidSignature { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn bounds_are_zero_to_one() {
        let cfg = MinhashConfig::default();
        let params = HashParams::new(&cfg);
        let a = shingle_set(&["abcde", "bcdef"]);
        let b = shingle_set(&["fghij", "ghijk"]);
        let est = estimate(&signature(&a, &params, &cfg), &signature(&b, &params, &cfg)).unwrap();
        assert!((0.0..=1.0).contains(&est));
    }
}
