//! Doc Cache - a document-store backed key-value cache
//!
//! Persists entries in a shared document collection with per-entry TTL
//! expiration and bulk invalidation, so multiple processes can coordinate
//! through one backing store.

pub mod cache;
pub mod config;
pub mod error;
pub mod storage;
pub mod tasks;

pub use cache::{CacheEntry, CacheStore, EntryPayload};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use storage::{CacheRecord, DocumentCollection, Filter, MemoryCollection};
pub use tasks::spawn_cleanup_task;
