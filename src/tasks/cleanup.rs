//! Expired-Record Cleanup Task
//!
//! Background task that periodically sweeps expired records out of the
//! backing collection. Reads filter expiration inline, so this task is pure
//! space reclamation; the cache stays correct at any cadence, including if
//! the sweep never runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::storage::DocumentCollection;

/// Spawns a background task that periodically removes expired records.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. The store holds no in-process state, so no locking is
/// involved; each sweep is one bulk remove against the backing collection
/// and may race harmlessly with concurrent reads and writes.
///
/// # Arguments
/// * `store` - Shared cache store to sweep
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::new(collection, &config));
/// let cleanup_handle = spawn_cleanup_task(store.clone(), config.cleanup_interval_secs);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<C>(store: Arc<CacheStore<C>>, cleanup_interval_secs: u64) -> JoinHandle<()>
where
    C: DocumentCollection + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            match store.cleanup() {
                Ok(removed) if removed > 0 => {
                    info!("Cache cleanup: removed {} expired records", removed);
                }
                Ok(_) => {
                    debug!("Cache cleanup: no expired records found");
                }
                // A failed sweep only delays reclamation; the next tick retries.
                Err(e) => {
                    warn!("Cache cleanup sweep failed: {}", e);
                }
            }
        }
    })
}
