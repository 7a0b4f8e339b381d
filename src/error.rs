//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Stored payload bytes could not be deserialized.
    ///
    /// Signals data corruption or a version skew in the encoding format.
    /// `CacheStore::read` downgrades this to a miss: a cache is always
    /// allowed to forget, so corruption is never fatal to the caller.
    #[error("corrupt payload: {0}")]
    CorruptPayload(#[source] serde_json::Error),

    /// A value could not be serialized for storage.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// The backing document store is unreachable or timed out.
    ///
    /// Propagated to the caller unmodified; this layer adds no retries.
    #[error("cache backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A `delete_matched` pattern could not be translated into a key filter.
    #[error("invalid key pattern: {0}")]
    InvalidPattern(String),

    /// The operation is not supported by this backend.
    ///
    /// Raised (never silently no-op'd) so callers cannot mistake the
    /// absence of an atomic counter for a successful increment.
    #[error("operation not supported by this cache backend: {0}")]
    Unsupported(&'static str),
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
