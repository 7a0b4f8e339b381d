//! Abstract Document Collection
//!
//! The narrow interface the cache requires from its storage collaborator.
//! A backing store only needs single-document find/upsert/remove primitives
//! plus filters over the record id and expiration timestamp; everything else
//! (connection management, request timeouts, retries) stays on the driver's
//! side of this boundary.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Cache Record ==
/// The persisted document, one per cache slot.
///
/// `payload` is an opaque blob produced by the entry codec and is never
/// parsed by the collection or the store. Timestamps are stored as separate,
/// directly queryable fields so expiration can be filtered server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Primary key (the cache key, unique per collection)
    pub id: String,
    /// Codec-serialized value bytes
    pub payload: Vec<u8>,
    /// Unix timestamp (seconds) set at write time; informational only
    pub created_at: i64,
    /// Unix timestamp (seconds) after which the record is no longer live
    pub expires_at: i64,
}

// == Filters ==
/// Selector over the record id.
#[derive(Debug, Clone)]
pub enum KeySelector {
    /// Match every record
    Any,
    /// Exact id equality
    Eq(String),
    /// Id starts with the given literal prefix
    Prefix(String),
    /// Id matches an anchored regular expression
    Regex(Regex),
}

impl KeySelector {
    /// Returns true if the selector matches the given id.
    pub fn matches(&self, id: &str) -> bool {
        match self {
            KeySelector::Any => true,
            KeySelector::Eq(key) => id == key,
            KeySelector::Prefix(prefix) => id.starts_with(prefix.as_str()),
            KeySelector::Regex(re) => re.is_match(id),
        }
    }
}

/// Selector over the record expiration timestamp.
#[derive(Debug, Clone, Copy)]
pub enum ExpirySelector {
    /// Match regardless of expiration
    Any,
    /// Match records still live at `t`: `expires_at > t`
    LiveAt(i64),
    /// Match records expired at `t`: `expires_at <= t`
    ExpiredAt(i64),
}

impl ExpirySelector {
    /// Returns true if the selector matches the given expiration timestamp.
    pub fn matches(&self, expires_at: i64) -> bool {
        match *self {
            ExpirySelector::Any => true,
            ExpirySelector::LiveAt(t) => expires_at > t,
            ExpirySelector::ExpiredAt(t) => expires_at <= t,
        }
    }
}

/// Conjunction of a key selector and an expiry selector.
#[derive(Debug, Clone)]
pub struct Filter {
    pub key: KeySelector,
    pub expiry: ExpirySelector,
}

impl Filter {
    /// Matches every record in the collection.
    pub fn all() -> Self {
        Self {
            key: KeySelector::Any,
            expiry: ExpirySelector::Any,
        }
    }

    /// Matches the record with the given id, regardless of expiration.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            key: KeySelector::Eq(id.into()),
            expiry: ExpirySelector::Any,
        }
    }

    /// Matches the record with the given id only while it is live at `now`.
    pub fn live_id(id: impl Into<String>, now: i64) -> Self {
        Self {
            key: KeySelector::Eq(id.into()),
            expiry: ExpirySelector::LiveAt(now),
        }
    }

    /// Matches every record already expired at `now`.
    pub fn expired(now: i64) -> Self {
        Self {
            key: KeySelector::Any,
            expiry: ExpirySelector::ExpiredAt(now),
        }
    }

    /// Matches records whose id satisfies the given selector.
    pub fn by_key(selector: KeySelector) -> Self {
        Self {
            key: selector,
            expiry: ExpirySelector::Any,
        }
    }

    /// Returns true if the record satisfies both selectors.
    pub fn matches(&self, record: &CacheRecord) -> bool {
        self.key.matches(&record.id) && self.expiry.matches(record.expires_at)
    }
}

// == Document Collection Trait ==
/// Storage primitives the cache store is written against.
///
/// Implementations must provide atomic single-document upsert/find/remove;
/// all serialization of concurrent access happens behind this trait. Errors
/// surface as `CacheError::BackendUnavailable` and are propagated unmodified.
pub trait DocumentCollection: Send + Sync {
    /// Returns the first record matching the filter, if any.
    fn find_one(&self, filter: &Filter) -> Result<Option<CacheRecord>>;

    /// Returns all records matching the filter.
    fn find_many(&self, filter: &Filter) -> Result<Vec<CacheRecord>>;

    /// Inserts the record, or fully replaces an existing record with the
    /// same id. No partial field merging.
    fn upsert(&self, id: &str, record: CacheRecord) -> Result<()>;

    /// Removes the record with the given id. Removing an absent id is not
    /// an error.
    fn remove_one(&self, id: &str) -> Result<()>;

    /// Removes every record matching the filter, returning how many were
    /// removed.
    fn remove_many(&self, filter: &Filter) -> Result<usize>;
}

impl<C: DocumentCollection + ?Sized> DocumentCollection for std::sync::Arc<C> {
    fn find_one(&self, filter: &Filter) -> Result<Option<CacheRecord>> {
        (**self).find_one(filter)
    }

    fn find_many(&self, filter: &Filter) -> Result<Vec<CacheRecord>> {
        (**self).find_many(filter)
    }

    fn upsert(&self, id: &str, record: CacheRecord) -> Result<()> {
        (**self).upsert(id, record)
    }

    fn remove_one(&self, id: &str) -> Result<()> {
        (**self).remove_one(id)
    }

    fn remove_many(&self, filter: &Filter) -> Result<usize> {
        (**self).remove_many(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, expires_at: i64) -> CacheRecord {
        CacheRecord {
            id: id.to_string(),
            payload: vec![],
            created_at: 0,
            expires_at,
        }
    }

    #[test]
    fn test_key_selector_eq() {
        let sel = KeySelector::Eq("user:1".to_string());
        assert!(sel.matches("user:1"));
        assert!(!sel.matches("user:12"));
    }

    #[test]
    fn test_key_selector_prefix() {
        let sel = KeySelector::Prefix("user:".to_string());
        assert!(sel.matches("user:1"));
        assert!(sel.matches("user:"));
        assert!(!sel.matches("order:1"));
    }

    #[test]
    fn test_expiry_selector_boundary_is_strict() {
        // Live iff expires_at > now; at exactly now the record is expired.
        assert!(!ExpirySelector::LiveAt(100).matches(100));
        assert!(ExpirySelector::LiveAt(100).matches(101));
        assert!(ExpirySelector::ExpiredAt(100).matches(100));
        assert!(!ExpirySelector::ExpiredAt(100).matches(101));
    }

    #[test]
    fn test_filter_conjunction() {
        let filter = Filter::live_id("k", 50);
        assert!(filter.matches(&record("k", 51)));
        assert!(!filter.matches(&record("k", 50)));
        assert!(!filter.matches(&record("other", 51)));
    }
}
