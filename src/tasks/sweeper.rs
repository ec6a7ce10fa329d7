//! TTL Sweeper Task
//!
//! Background task that periodically removes expired entries from a
//! [`MemoryStore`]. The store already drops expired entries lazily on
//! access; the sweeper reclaims the ones nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically purges expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. The handle can be used to abort the task during
/// graceful shutdown.
///
/// # Arguments
/// * `store` - Store handle to sweep
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Example
/// ```ignore
/// let store = MemoryStore::new();
/// let sweeper = spawn_sweeper_task(store.clone(), 60);
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task(store: MemoryStore, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweeper task with interval of {} seconds",
            interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;

            // Log sweep statistics
            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let store = MemoryStore::new();

        // Add an entry with a very short TTL
        store.set("expire_soon", b"value").await.unwrap();
        store.expire("expire_soon", 1).await.unwrap();

        // Spawn sweeper with 1 second interval
        let handle = spawn_sweeper_task(store.clone(), 1);

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // The entry is gone without anyone reading it
        assert_eq!(store.len().await, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let store = MemoryStore::new();

        // Add an entry with a long TTL
        store.set("long_lived", b"value").await.unwrap();
        store.expire("long_lived", 3600).await.unwrap();

        let handle = spawn_sweeper_task(store.clone(), 1);

        // Wait for a sweep to run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Entry still present
        assert_eq!(
            store.get("long_lived").await.unwrap(),
            Some(b"value".to_vec())
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let store = MemoryStore::new();

        let handle = spawn_sweeper_task(store, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify the task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
