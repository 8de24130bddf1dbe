//! Scheduled eviction sweep.
//!
//! Lazy eviction only reclaims entries somebody asks for again; the sweep
//! reclaims the rest. It runs as a background task on a fixed interval and
//! must be stopped at shutdown so no timer fires against a torn-down
//! store.

use crate::store::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to a running sweep task.
///
/// Dropping the handle does NOT stop the task; call [`shutdown`] (or
/// [`shutdown_and_wait`]) during teardown.
///
/// [`shutdown`]: SweeperHandle::shutdown
/// [`shutdown_and_wait`]: SweeperHandle::shutdown_and_wait
pub struct SweeperHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweep task to stop after its current iteration.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Signals the sweep task to stop and waits for it to finish.
    pub async fn shutdown_and_wait(self) {
        self.token.cancel();
        let _ = self.task.await;
    }

    /// Whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl<V: Clone + Send + Sync + 'static> CacheStore<V> {
    /// Spawns the scheduled eviction task for this store.
    ///
    /// Every `interval`, entries whose expiry instant has passed are
    /// removed. The task runs until the returned handle is shut down.
    pub fn spawn_sweeper(store: &Arc<Self>, interval: Duration) -> SweeperHandle {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let store = Arc::clone(store);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so the first
            // sweep happens one full interval after startup.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("Cache sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let purged = store.purge_expired();
                        if purged > 0 {
                            debug!(purged, "Cache sweep evicted expired entries");
                        }
                    }
                }
            }
        });

        SweeperHandle { token, task }
    }
}
