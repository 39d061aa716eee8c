//! Banded locality-sensitive hashing over MinHash signatures.
//!
//! A signature of length `H = B * R` is sliced into `B` contiguous bands of
//! `R` rows each. Each band is hashed independently; two documents that
//! agree on any one band hash become LSH candidates for each other. This
//! trades false negatives for a tunable candidate-set size, the standard
//! LSH "S-curve" over `(B, R)`.
//!
//! ```
//! use lshindex::{LshConfig, LshIndex};
//!
//! let index = LshIndex::new(LshConfig::new().with_num_bands(4).with_rows_per_band(2)).unwrap();
//! let sig = vec![1u32, 2, 3, 4, 5, 6, 7, 8];
//! index.index(1, &sig).unwrap();
//! assert!(index.candidates(&sig).unwrap().contains(&1));
//! ```

mod config;

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use md5::{Digest, Md5};

pub use config::{LshConfig, LshError};

/// An in-memory banded LSH index.
///
/// Each of the `B` bands owns its own `HashMap<band_hash, doc_ids>`; entries
/// within a band's map are created lazily on first insert. All bands sit
/// behind a single `RwLock`, mirroring the coarse-grained locking used for
/// the comparable in-memory structure in the teacher's `index` crate.
pub struct LshIndex {
    bands: RwLock<Vec<HashMap<String, HashSet<u64>>>>,
    cfg: LshConfig,
}

impl LshIndex {
    /// Validate `cfg` and allocate the (empty) band table.
    pub fn new(cfg: LshConfig) -> Result<Self, LshError> {
        cfg.validate()?;
        let bands = (0..cfg.num_bands).map(|_| HashMap::new()).collect();
        Ok(Self {
            bands: RwLock::new(bands),
            cfg,
        })
    }

    pub fn config(&self) -> &LshConfig {
        &self.cfg
    }

    /// Insert `doc_id` into every band bucket its signature falls into.
    pub fn index(&self, doc_id: u64, signature: &[u32]) -> Result<(), LshError> {
        self.check_len(signature)?;
        let mut bands = self.bands.write().map_err(|_| LshError::Poisoned)?;
        for (b, band) in bands.iter_mut().enumerate() {
            let slice = self.band_slice(signature, b);
            band.entry(Self::band_hash(slice)).or_default().insert(doc_id);
        }
        Ok(())
    }

    /// Insert `doc_id` into a single band bucket by its already-computed
    /// hash, bypassing signature slicing. Used only to rehydrate the table
    /// from persisted bucket rows at startup (`store::Store::rehydrate`),
    /// where the bucket hash is read back rather than recomputed.
    pub fn insert_raw(&self, band_id: usize, bucket_hash: String, doc_id: u64) -> Result<(), LshError> {
        let mut bands = self.bands.write().map_err(|_| LshError::Poisoned)?;
        let band = bands
            .get_mut(band_id)
            .ok_or_else(|| LshError::InvalidConfig(format!("band_id {band_id} out of range")))?;
        band.entry(bucket_hash).or_default().insert(doc_id);
        Ok(())
    }

    /// Union of every document id sharing at least one band bucket with
    /// `signature`. Does not include `signature`'s own owner unless that
    /// owner was indexed separately.
    pub fn candidates(&self, signature: &[u32]) -> Result<HashSet<u64>, LshError> {
        self.check_len(signature)?;
        let bands = self.bands.read().map_err(|_| LshError::Poisoned)?;
        let mut out = HashSet::new();
        for (b, band) in bands.iter().enumerate() {
            let slice = self.band_slice(signature, b);
            if let Some(ids) = band.get(&Self::band_hash(slice)) {
                out.extend(ids.iter().copied());
            }
        }
        Ok(out)
    }

    /// Remove `doc_id` from every band bucket, dropping any bucket left
    /// empty behind it.
    pub fn remove(&self, doc_id: u64) -> Result<(), LshError> {
        let mut bands = self.bands.write().map_err(|_| LshError::Poisoned)?;
        for band in bands.iter_mut() {
            band.retain(|_, ids| {
                ids.remove(&doc_id);
                !ids.is_empty()
            });
        }
        Ok(())
    }

    /// The `(band_id, bucket_hash)` pairs `signature` would be filed under,
    /// without mutating the table. Used by callers that need to persist
    /// bucket rows alongside an `index` call (see `store::Store::add_document`).
    pub fn band_buckets(&self, signature: &[u32]) -> Result<Vec<(u32, String)>, LshError> {
        self.check_len(signature)?;
        Ok((0..self.cfg.num_bands)
            .map(|b| (b as u32, Self::band_hash(self.band_slice(signature, b))))
            .collect())
    }

    fn band_slice<'a>(&self, signature: &'a [u32], band: usize) -> &'a [u32] {
        let start = band * self.cfg.rows_per_band;
        &signature[start..start + self.cfg.rows_per_band]
    }

    fn check_len(&self, signature: &[u32]) -> Result<(), LshError> {
        let expected = self.cfg.expected_signature_len();
        if signature.len() != expected {
            return Err(LshError::SignatureLengthMismatch {
                expected,
                actual: signature.len(),
            });
        }
        Ok(())
    }

    /// Hash a band: the slice's values as comma-joined decimal text, MD5-hashed
    /// to a hex digest. Stable across process restarts by construction, so it
    /// doubles as the persisted bucket key (see `store::lsh_buckets`).
    fn band_hash(slice: &[u32]) -> String {
        let joined = slice.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        hex::encode(Md5::digest(joined.as_bytes()))
    }
}
