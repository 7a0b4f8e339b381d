//! Entry Codec Module
//!
//! Converts a logical cache entry into the payload bytes of a stored record
//! and back, doing the minimum possible (de)serialization work. Only the
//! value is serialized into the payload; timestamps stay as separate record
//! fields so the backing store can filter on them directly.

use serde_json::Value;

use crate::cache::entry::{CacheEntry, EntryPayload};
use crate::error::{CacheError, Result};

// == Encode ==
/// Produces the payload bytes for an entry.
///
/// A pre-serialized payload is emitted byte-for-byte: the caller already
/// paid for serialization, and repeating it is wasted CPU. A decoded value
/// is serialized exactly once. Neither path ever deserializes anything.
pub fn encode(entry: &CacheEntry) -> Result<Vec<u8>> {
    match entry.payload() {
        EntryPayload::Serialized(bytes) => Ok(bytes.clone()),
        EntryPayload::Value(value) => serde_json::to_vec(value).map_err(CacheError::Encode),
    }
}

// == Decode ==
/// Reconstructs an entry from stored payload bytes and record metadata.
///
/// The decoded value is set directly through `CacheEntry::from_decoded`,
/// which performs no transformation; going through a constructor that
/// eagerly re-serializes would throw away the work this function just did.
///
/// Fails with `CorruptPayload` when the bytes do not deserialize, which the
/// store treats as a miss: corruption and format skew must degrade
/// gracefully, never crash.
pub fn decode(bytes: &[u8], created_at: i64, expires_at: i64) -> Result<CacheEntry> {
    let value: Value = serde_json::from_slice(bytes).map_err(CacheError::CorruptPayload)?;
    Ok(CacheEntry::from_decoded(value, created_at, expires_at))
}
