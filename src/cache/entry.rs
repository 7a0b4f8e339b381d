//! Cache Entry Module
//!
//! Defines the transient, in-memory form of a cached value plus the metadata
//! needed to persist it. An entry only exists between the caller and the
//! codec; at rest it collapses into the payload bytes of a `CacheRecord`.

use chrono::Utc;
use serde_json::Value;

// == Entry Payload ==
/// The value carried by an entry, in one of two states.
///
/// Entries deliberately have two construction paths. The raw-value path
/// holds a decoded value that the codec will serialize exactly once. The
/// serialized path holds bytes the caller already produced (for example
/// upstream size-accounting or compression already forced a serialization);
/// the codec passes those through untouched rather than re-serializing.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPayload {
    /// A decoded value; serialization is still owed
    Value(Value),
    /// Already-serialized bytes; emitted verbatim by the codec
    Serialized(Vec<u8>),
}

// == Cache Entry ==
/// A logical cache entry: payload plus creation and expiration timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    payload: EntryPayload,
    /// Creation timestamp (Unix seconds); informational only
    created_at: i64,
    /// Expiration timestamp (Unix seconds); always set
    expires_at: i64,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry from a decoded value with the given TTL.
    pub fn new(value: Value, ttl_secs: u64) -> Self {
        let now = now_epoch();
        Self {
            payload: EntryPayload::Value(value),
            created_at: now,
            expires_at: expiry_for(now, ttl_secs),
        }
    }

    /// Creates an entry from bytes that are already in the codec's encoded
    /// form. The codec will store these bytes byte-for-byte.
    pub fn pre_serialized(bytes: Vec<u8>, ttl_secs: u64) -> Self {
        let now = now_epoch();
        Self {
            payload: EntryPayload::Serialized(bytes),
            created_at: now,
            expires_at: expiry_for(now, ttl_secs),
        }
    }

    /// Reconstructs an entry from an already-decoded value and stored
    /// metadata. Performs no transformation of any kind: this is the decode
    /// path's constructor, and it must never serialize the value it is
    /// handed.
    pub fn from_decoded(value: Value, created_at: i64, expires_at: i64) -> Self {
        Self {
            payload: EntryPayload::Value(value),
            created_at,
            expires_at,
        }
    }

    // == Accessors ==
    /// The entry payload, in whichever state it was constructed with.
    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }

    /// The decoded value, if this entry holds one.
    pub fn value(&self) -> Option<&Value> {
        match &self.payload {
            EntryPayload::Value(v) => Some(v),
            EntryPayload::Serialized(_) => None,
        }
    }

    /// Consumes the entry, yielding the decoded value if it holds one.
    pub fn into_value(self) -> Option<Value> {
        match self.payload {
            EntryPayload::Value(v) => Some(v),
            EntryPayload::Serialized(_) => None,
        }
    }

    /// True if the payload is already in serialized byte form.
    pub fn is_serialized(&self) -> bool {
        matches!(self.payload, EntryPayload::Serialized(_))
    }

    /// Creation timestamp (Unix seconds). Kept as metadata for debugging;
    /// never consulted for expiration.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Expiration timestamp (Unix seconds).
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at the given clock time.
    ///
    /// An entry is live iff `expires_at > now`; at exactly `expires_at` it
    /// is already expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in seconds.
pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Computes an expiration timestamp, saturating instead of overflowing.
///
/// "Cache forever" is expressed as an effectively-infinite TTL, so huge TTLs
/// are valid input; they pin the expiration at the far end of the timestamp
/// range rather than wrapping into the past.
fn expiry_for(now: i64, ttl_secs: u64) -> i64 {
    now.saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
}
