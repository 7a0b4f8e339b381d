//! Storage Module
//!
//! The abstract document-collection boundary the cache is written against,
//! plus the in-memory implementation used for tests and local development.

mod collection;
mod memory;

// Re-export public types
pub use collection::{CacheRecord, DocumentCollection, ExpirySelector, Filter, KeySelector};
pub use memory::MemoryCollection;
