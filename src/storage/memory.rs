//! In-Memory Collection
//!
//! A `DocumentCollection` backed by a HashMap behind an RwLock. Used as the
//! test double for the abstract collection and as a local-development
//! backend; the cache store cannot tell it apart from a real document store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::storage::{CacheRecord, DocumentCollection, Filter};

// == Memory Collection ==
/// HashMap-backed document collection.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    records: RwLock<HashMap<String, CacheRecord>>,
}

impl MemoryCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records physically present, live or expired.
    pub fn len(&self) -> usize {
        self.records.map_read(|map| map.len()).unwrap_or(0)
    }

    /// Returns true if no records are physically present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A poisoned lock means a writer panicked mid-operation; report it the same
// way a real backend reports a dead connection.
trait MapLock {
    fn map_read<R>(&self, f: impl FnOnce(&HashMap<String, CacheRecord>) -> R) -> Result<R>;
    fn map_write<R>(&self, f: impl FnOnce(&mut HashMap<String, CacheRecord>) -> R) -> Result<R>;
}

impl MapLock for RwLock<HashMap<String, CacheRecord>> {
    fn map_read<R>(&self, f: impl FnOnce(&HashMap<String, CacheRecord>) -> R) -> Result<R> {
        let guard = self
            .read()
            .map_err(|_| CacheError::BackendUnavailable("memory collection lock poisoned".into()))?;
        Ok(f(&guard))
    }

    fn map_write<R>(&self, f: impl FnOnce(&mut HashMap<String, CacheRecord>) -> R) -> Result<R> {
        let mut guard = self
            .write()
            .map_err(|_| CacheError::BackendUnavailable("memory collection lock poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

impl DocumentCollection for MemoryCollection {
    fn find_one(&self, filter: &Filter) -> Result<Option<CacheRecord>> {
        self.records
            .map_read(|map| map.values().find(|r| filter.matches(r)).cloned())
    }

    fn find_many(&self, filter: &Filter) -> Result<Vec<CacheRecord>> {
        self.records
            .map_read(|map| map.values().filter(|r| filter.matches(r)).cloned().collect())
    }

    fn upsert(&self, id: &str, record: CacheRecord) -> Result<()> {
        self.records.map_write(|map| {
            map.insert(id.to_string(), record);
        })
    }

    fn remove_one(&self, id: &str) -> Result<()> {
        self.records.map_write(|map| {
            map.remove(id);
        })
    }

    fn remove_many(&self, filter: &Filter) -> Result<usize> {
        // Match and remove under one write lock so the returned count is
        // exact: nothing can vanish or be rewritten between the two steps.
        self.records.map_write(|map| {
            let before = map.len();
            map.retain(|_, record| !filter.matches(record));
            before - map.len()
        })
    }
}
