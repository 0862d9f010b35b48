use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::AllocationSource;
use crate::error::SnapshotError;
use crate::store::SnapshotStore;

/// Periodic snapshot refresh. The first tick fires immediately, so the store
/// is populated at startup; each later tick is a single fetch with no retry.
pub struct RefreshTask {
    store: SnapshotStore,
    source: Arc<dyn AllocationSource>,
    interval: Duration,
}

impl RefreshTask {
    pub fn new(store: SnapshotStore, source: Arc<dyn AllocationSource>, interval: Duration) -> Self {
        Self {
            store,
            source,
            interval,
        }
    }

    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.store.refresh(self.source.as_ref()).await {
                            Ok(snapshot) => tracing::info!(
                                events = snapshot.events.len(),
                                quarantined = snapshot.quarantined_rows,
                                "[RefreshTask] 📸 Snapshot refreshed"
                            ),
                            Err(SnapshotError::Superseded) => tracing::debug!(
                                "[RefreshTask] Snapshot refresh superseded, dropping result"
                            ),
                            Err(err) => tracing::error!(
                                "[RefreshTask] 🔴 Snapshot refresh failed: {err}"
                            ),
                        }
                    }
                    () = token.cancelled() => {
                        tracing::debug!("[RefreshTask] shutting down");
                        break;
                    }
                }
            }
        })
    }
}
