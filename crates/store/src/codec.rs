//! Bincode row encoding, shared by every table.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(|e| StoreError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map(|(value, _)| value)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Composite key for the `lsh_buckets` table: `"{band_id}:{bucket_hash}"`.
pub fn bucket_key(band_id: u32, bucket_hash: &str) -> String {
    format!("{band_id}:{bucket_hash}")
}

/// Inverse of [`bucket_key`].
pub fn parse_bucket_key(key: &str) -> Option<(u32, &str)> {
    let (band, hash) = key.split_once(':')?;
    Some((band.parse().ok()?, hash))
}
