//! Cache Module
//!
//! Entry lifecycle (logical entry, payload codec, key patterns) and the
//! store that drives it against an abstract document collection.

pub mod codec;
mod entry;
pub mod pattern;
mod store;


// Re-export public types
pub use entry::{now_epoch, CacheEntry, EntryPayload};
pub use store::CacheStore;
