//! Expiry Sweep Task
//!
//! Background task that periodically removes stale cache entries, so the
//! cache shrinks even when no new lookups trigger a write-time sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResultCache;

/// Spawns a background task that periodically evicts expired cache entries.
///
/// # Arguments
/// * `cache` - shared result cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps; zero
///   is treated as one
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<ResultCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.evict_expired(cache.expiry_cutoff()).await;

            if removed > 0 {
                info!("Expiry sweep: removed {} stale entries", removed);
            } else {
                debug!("Expiry sweep: no stale entries found");
            }
        }
    })
}
