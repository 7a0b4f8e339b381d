//! Cache Store Module
//!
//! The operational surface over a document collection: read, write, delete,
//! clear, cleanup and pattern-delete, with expiration layered over a plain
//! key-value substrate.
//!
//! The store holds no in-process mutable state. Every operation is a single
//! request against the backing collection, which provides atomic
//! single-document upsert/find/remove; concurrent writers race with
//! last-writer-wins semantics and bulk deletes may destroy a concurrently
//! written record, which is an acceptable outcome for a cache (it costs one
//! miss, never correctness).

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::codec;
use crate::cache::entry::{now_epoch, CacheEntry};
use crate::cache::pattern;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::storage::{CacheRecord, DocumentCollection, Filter};

// == Cache Store ==
/// Document-store backed cache with TTL expiration.
#[derive(Debug)]
pub struct CacheStore<C: DocumentCollection> {
    /// Injected collection handle; there is no ambient global backend
    collection: C,
    /// TTL in seconds applied when a write supplies none
    default_ttl_secs: u64,
}

impl<C: DocumentCollection> CacheStore<C> {
    // == Constructor ==
    /// Creates a store over the given collection.
    ///
    /// Every record must carry an expiration, so a zero default TTL (which
    /// would make every write dead on arrival) is bumped to one second.
    pub fn new(collection: C, config: &CacheConfig) -> Self {
        Self {
            collection,
            default_ttl_secs: config.default_ttl_secs.max(1),
        }
    }

    /// The effective default TTL in seconds.
    pub fn default_ttl_secs(&self) -> u64 {
        self.default_ttl_secs
    }

    // == Write ==
    /// Stores a value under the given key with an optional TTL.
    ///
    /// The write is blind: no read-before-write, and any prior record for
    /// the key is fully replaced.
    pub fn write<T: Serialize>(&self, key: &str, value: &T, ttl_secs: Option<u64>) -> Result<()> {
        let value = serde_json::to_value(value).map_err(CacheError::Encode)?;
        let entry = CacheEntry::new(value, ttl_secs.unwrap_or(self.default_ttl_secs));
        self.write_entry(key, entry)
    }

    /// Stores a pre-built entry under the given key.
    ///
    /// This is the host-contract entry point; it also carries the
    /// pre-serialized input path, whose bytes land in storage untouched.
    pub fn write_entry(&self, key: &str, entry: CacheEntry) -> Result<()> {
        let payload = codec::encode(&entry)?;
        let record = CacheRecord {
            id: key.to_string(),
            payload,
            created_at: entry.created_at(),
            expires_at: entry.expires_at(),
        };
        self.collection.upsert(key, record)?;
        debug!(key, expires_at = entry.expires_at(), "cache write");
        Ok(())
    }

    // == Read ==
    /// Retrieves and deserializes the value for a key.
    ///
    /// Returns `Ok(None)` on a miss. An expired record is indistinguishable
    /// from an absent one, and a record whose payload no longer matches the
    /// requested type is treated as corrupt, which also reads as a miss.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(entry) = self.read_entry(key)? else {
            return Ok(None);
        };
        match entry.into_value() {
            Some(value) => match serde_json::from_value(value) {
                Ok(decoded) => Ok(Some(decoded)),
                Err(e) => {
                    warn!(key, error = %e, "cached value does not match requested type, treating as miss");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Retrieves the logical entry for a key, if a live record exists.
    ///
    /// Expiration is checked inline against the current clock by filtering
    /// server-side on `expires_at > now`; correctness never depends on a
    /// cleanup sweep having run. Expired records are not deleted on read.
    /// A corrupt payload is logged and downgraded to a miss.
    pub fn read_entry(&self, key: &str) -> Result<Option<CacheEntry>> {
        let now = now_epoch();
        let Some(record) = self.collection.find_one(&Filter::live_id(key, now))? else {
            debug!(key, "cache miss");
            return Ok(None);
        };

        match codec::decode(&record.payload, record.created_at, record.expires_at) {
            Ok(entry) => {
                debug!(key, "cache hit");
                Ok(Some(entry))
            }
            Err(CacheError::CorruptPayload(e)) => {
                warn!(key, error = %e, "corrupt cache payload, treating as miss");
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    // == Delete ==
    /// Removes the record for a key, if any. Idempotent: deleting an absent
    /// key succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.collection.remove_one(key)?;
        debug!(key, "cache delete");
        Ok(())
    }

    // == Clear ==
    /// Removes every record in the collection, live or expired.
    pub fn clear(&self) -> Result<()> {
        let removed = self.collection.remove_many(&Filter::all())?;
        debug!(removed, "cache cleared");
        Ok(())
    }

    // == Cleanup ==
    /// Removes all records with `expires_at <= now` and returns how many
    /// were removed.
    ///
    /// Pure space reclamation: reads already filter expired records out, so
    /// this can run at any cadence, including never, and is safe to run
    /// concurrently with reads and writes. Never removes a live record.
    pub fn cleanup(&self) -> Result<usize> {
        let removed = self.collection.remove_many(&Filter::expired(now_epoch()))?;
        debug!(removed, "cache cleanup");
        Ok(removed)
    }

    // == Delete Matched ==
    /// Removes every record whose key matches the glob pattern, regardless
    /// of expiration, and returns how many were removed.
    ///
    /// Patterns with a literal prefix translate to a prefix filter rather
    /// than a full-collection scan.
    pub fn delete_matched(&self, glob: &str) -> Result<usize> {
        let selector = pattern::parse(glob)?;
        let removed = self.collection.remove_many(&Filter::by_key(selector))?;
        debug!(pattern = glob, removed, "cache delete_matched");
        Ok(removed)
    }

    // == Counters ==
    /// Atomic increment is not supported by this backend.
    ///
    /// Always returns `CacheError::Unsupported` rather than silently doing
    /// nothing, so callers cannot mistake a no-op for an atomic update.
    pub fn increment(&self, _key: &str, _amount: i64) -> Result<i64> {
        Err(CacheError::Unsupported("increment"))
    }

    /// Atomic decrement is not supported by this backend.
    pub fn decrement(&self, _key: &str, _amount: i64) -> Result<i64> {
        Err(CacheError::Unsupported("decrement"))
    }
}
