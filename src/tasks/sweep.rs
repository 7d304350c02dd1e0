//! Periodic Sweep Tasks
//!
//! Background tasks that keep the in-memory stores bounded: the cache sweep
//! drops expired entries, the limiter sweep drops entries whose window or
//! block has run out. Foreground reads already evict lazily; the sweeps
//! reclaim entries that are never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::limiter::RateLimiter;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task loops forever, sleeping for `interval` between runs and taking
/// the same write lock foreground operations use. The returned handle is
/// used to abort the task during graceful shutdown or test teardown.
pub fn spawn_cache_sweep_task<V>(
    cache: Arc<RwLock<TtlCache<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep()
            };

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}

/// Spawns a background task that periodically sweeps dead limiter entries.
///
/// Same lifecycle as [`spawn_cache_sweep_task`]: sleep, write-lock, sweep,
/// abortable via the returned handle.
pub fn spawn_limiter_sweep_task(
    limiter: Arc<RwLock<RateLimiter>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting limiter sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut limiter_guard = limiter.write().await;
                limiter_guard.sweep()
            };

            if removed > 0 {
                info!("Limiter sweep: removed {} dead entries", removed);
            } else {
                debug!("Limiter sweep: nothing to remove");
            }
        }
    })
}
