//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Cleanup: sweeps expired records out of the backing collection at
//!   configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
