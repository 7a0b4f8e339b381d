//! Integration Tests for the Cache Store
//!
//! Exercises the full write/read/invalidate lifecycle against the in-memory
//! document collection, including the expiration boundary and bulk-delete
//! scoping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use doc_cache::cache::now_epoch;
use doc_cache::{
    CacheConfig, CacheEntry, CacheError, CacheStore, DocumentCollection, Filter, MemoryCollection,
};

// == Helper Functions ==

/// Builds a store that shares its collection with the test, so physical
/// storage can be inspected independently of read-time filtering.
fn store_with_collection() -> (CacheStore<Arc<MemoryCollection>>, Arc<MemoryCollection>) {
    // Surface store logging in test output when RUST_LOG is set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let collection = Arc::new(MemoryCollection::new());
    let store = CacheStore::new(collection.clone(), &CacheConfig::default());
    (store, collection)
}

fn plant_expiring(store: &CacheStore<Arc<MemoryCollection>>, key: &str, expires_at: i64) {
    let now = now_epoch();
    store
        .write_entry(key, CacheEntry::from_decoded(json!("planted"), now, expires_at))
        .unwrap();
}

// == Round Trip ==

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user_id: u64,
    roles: Vec<String>,
    note: String,
}

#[test]
fn test_round_trip_structured_value() {
    let (store, _) = store_with_collection();
    let session = Session {
        user_id: 42,
        roles: vec!["admin".to_string(), "editor".to_string()],
        note: String::new(),
    };

    store.write("session:42", &session, Some(60)).unwrap();
    let read: Option<Session> = store.read("session:42").unwrap();

    assert_eq!(read, Some(session));
}

#[test]
fn test_round_trip_empty_string_and_large_value() {
    let (store, _) = store_with_collection();

    store.write("empty", &"", None).unwrap();
    assert_eq!(store.read::<String>("empty").unwrap().as_deref(), Some(""));

    let large = "x".repeat(1024 * 1024);
    store.write("large", &large, None).unwrap();
    assert_eq!(store.read::<String>("large").unwrap(), Some(large));
}

// == Expiration Boundary ==

#[test]
fn test_expiration_boundary_is_strict() {
    let (store, _) = store_with_collection();
    let now = now_epoch();

    // Live: expires_at is comfortably in the future.
    plant_expiring(&store, "live", now + 3600);
    assert!(store.read::<String>("live").unwrap().is_some());

    // Expired the instant expires_at == now: the comparison is strictly
    // expires_at > now.
    plant_expiring(&store, "boundary", now);
    assert!(store.read::<String>("boundary").unwrap().is_none());

    plant_expiring(&store, "past", now - 1);
    assert!(store.read::<String>("past").unwrap().is_none());
}

#[test]
fn test_expired_record_is_not_deleted_on_read() {
    let (store, collection) = store_with_collection();
    let now = now_epoch();

    plant_expiring(&store, "stale", now - 10);

    assert!(store.read::<String>("stale").unwrap().is_none());
    // The record still physically occupies storage until a sweep.
    assert!(collection.find_one(&Filter::by_id("stale")).unwrap().is_some());
}

// == Overwrite ==

#[test]
fn test_overwrite_leaves_single_record() {
    let (store, collection) = store_with_collection();

    store.write("k", &"first", None).unwrap();
    store.write("k", &"second", None).unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(store.read::<String>("k").unwrap().as_deref(), Some("second"));
}

#[test]
fn test_rewrite_revives_expired_key() {
    let (store, _) = store_with_collection();
    let now = now_epoch();

    plant_expiring(&store, "k", now - 1);
    assert!(store.read::<String>("k").unwrap().is_none());

    store.write("k", &"fresh", None).unwrap();
    assert_eq!(store.read::<String>("k").unwrap().as_deref(), Some("fresh"));
}

// == Idempotent Delete ==

#[test]
fn test_delete_absent_key_succeeds() {
    let (store, _) = store_with_collection();

    store.delete("never-written").unwrap();
    store.delete("never-written").unwrap();
}

// == Cleanup Scope ==

#[test]
fn test_cleanup_removes_exactly_the_expired() {
    let (store, collection) = store_with_collection();
    let now = now_epoch();

    for i in 0..3 {
        plant_expiring(&store, &format!("expired:{i}"), now - 1 - i as i64);
    }
    for i in 0..2 {
        store.write(&format!("live:{i}"), &i, Some(3600)).unwrap();
    }

    let removed = store.cleanup().unwrap();

    assert_eq!(removed, 3);
    assert_eq!(collection.len(), 2);
    for i in 0..2 {
        assert!(store.read::<u64>(&format!("live:{i}")).unwrap().is_some());
    }
}

// == Pattern Delete ==

#[test]
fn test_delete_matched_scopes_to_pattern() {
    let (store, _) = store_with_collection();

    store.write("user:1", &"u1", None).unwrap();
    store.write("user:2", &"u2", None).unwrap();
    store.write("order:1", &"o1", None).unwrap();

    let removed = store.delete_matched("user:*").unwrap();

    assert_eq!(removed, 2);
    assert!(store.read::<String>("user:1").unwrap().is_none());
    assert!(store.read::<String>("user:2").unwrap().is_none());
    assert_eq!(store.read::<String>("order:1").unwrap().as_deref(), Some("o1"));
}

// == Clear ==

#[test]
fn test_clear_is_total() {
    let (store, collection) = store_with_collection();
    let now = now_epoch();

    let keys = ["a", "b", "c", "user:1"];
    for key in keys {
        store.write(key, &key, None).unwrap();
    }
    plant_expiring(&store, "stale", now - 1);

    store.clear().unwrap();

    assert!(collection.is_empty());
    for key in keys {
        assert!(store.read::<String>(key).unwrap().is_none());
    }
}

// == No Double Encode ==

#[test]
fn test_pre_serialized_payload_stored_byte_for_byte() {
    let (store, collection) = store_with_collection();

    let value = json!({"cached": [1, 2, 3], "hot": true});
    let input = serde_json::to_vec(&value).unwrap();

    store
        .write_entry("pre", CacheEntry::pre_serialized(input.clone(), 60))
        .unwrap();

    // The stored payload is the input bytes, not a further wrapped form.
    let record = collection.find_one(&Filter::by_id("pre")).unwrap().unwrap();
    assert_eq!(record.payload, input);

    // And it reads back as the original value.
    let read: Option<serde_json::Value> = store.read("pre").unwrap();
    assert_eq!(read, Some(value));
}

// == Unsupported Counters ==

#[test]
fn test_counters_raise_unsupported() {
    let (store, _) = store_with_collection();

    assert!(matches!(
        store.increment("hits", 1),
        Err(CacheError::Unsupported("increment"))
    ));
    assert!(matches!(
        store.decrement("hits", 1),
        Err(CacheError::Unsupported("decrement"))
    ));
}

// == Shared Backing Collection ==

#[test]
fn test_two_stores_share_one_collection() {
    // Two store handles over the same collection model two processes
    // coordinating through one backing store.
    let collection = Arc::new(MemoryCollection::new());
    let config = CacheConfig::default();
    let writer = CacheStore::new(collection.clone(), &config);
    let reader = CacheStore::new(collection, &config);

    writer.write("shared", &"payload", None).unwrap();
    assert_eq!(
        reader.read::<String>("shared").unwrap().as_deref(),
        Some("payload")
    );

    reader.delete("shared").unwrap();
    assert!(writer.read::<String>("shared").unwrap().is_none());
}
