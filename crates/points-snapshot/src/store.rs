use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use points_engine::{AllocationEvent, latest_timestamp, parse_snapshot_rows};

use crate::client::AllocationSource;
use crate::error::SnapshotError;

/// One immutable view of the upstream allocation log. All derived views are
/// computed from a single `Snapshot`; partial or interleaved states are never
/// observable.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub events: Vec<AllocationEvent>,
    /// Max event timestamp, the anchor for all "latest day" semantics.
    pub latest_timestamp: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub quarantined_rows: usize,
}

#[derive(Default)]
struct StoreInner {
    current: RwLock<Option<Arc<Snapshot>>>,
    last_ticket: AtomicU64,
}

/// Holder of the current snapshot, shared across the API handlers and the
/// refresh task. Cheap to clone.
#[derive(Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<StoreInner>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently installed snapshot, if any. `None` while the first fetch
    /// is outstanding and after a failed refresh.
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.inner.current.read().await.clone()
    }

    /// Fetch, validate and install a fresh snapshot.
    ///
    /// Each refresh takes a ticket up front; a result is only installed when
    /// no newer refresh has started since, so a slow superseded fetch can
    /// never clobber a newer snapshot. A failed fetch clears the store — the
    /// previous snapshot is discarded rather than served stale.
    pub async fn refresh(
        &self,
        source: &dyn AllocationSource,
    ) -> Result<Arc<Snapshot>, SnapshotError> {
        let ticket = self.inner.last_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        match source.fetch_allocations().await {
            Ok(rows) => {
                let parsed = parse_snapshot_rows(rows);
                let snapshot = Arc::new(Snapshot {
                    latest_timestamp: latest_timestamp(&parsed.events),
                    events: parsed.events,
                    fetched_at: Utc::now(),
                    quarantined_rows: parsed.quarantined_rows,
                });

                let mut current = self.inner.current.write().await;
                if self.inner.last_ticket.load(Ordering::SeqCst) != ticket {
                    return Err(SnapshotError::Superseded);
                }
                *current = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(err) => {
                let mut current = self.inner.current.write().await;
                if self.inner.last_ticket.load(Ordering::SeqCst) == ticket {
                    *current = None;
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tokio::sync::Notify;

    fn row(holder: &str, allocation: f64) -> Value {
        json!({
            "holder_address": holder,
            "token_address": "0xv1",
            "points_id": "P-6",
            "allocation": allocation,
            "timestamp": "2024-06-10T08:00:00Z",
        })
    }

    struct StubSource {
        result: Result<Vec<Value>, ()>,
    }

    #[async_trait::async_trait]
    impl AllocationSource for StubSource {
        async fn fetch_allocations(&self) -> Result<Vec<Value>, SnapshotError> {
            self.result
                .clone()
                .map_err(|()| SnapshotError::UpstreamStatus { status: 500 })
        }

        async fn fetch_raw_body(&self) -> Result<String, SnapshotError> {
            unimplemented!("not used by store tests")
        }
    }

    /// Blocks the fetch until the gate is released, to stage refresh races.
    struct GatedSource {
        gate: Arc<Notify>,
        rows: Vec<Value>,
    }

    #[async_trait::async_trait]
    impl AllocationSource for GatedSource {
        async fn fetch_allocations(&self) -> Result<Vec<Value>, SnapshotError> {
            self.gate.notified().await;
            Ok(self.rows.clone())
        }

        async fn fetch_raw_body(&self) -> Result<String, SnapshotError> {
            unimplemented!("not used by store tests")
        }
    }

    #[tokio::test]
    async fn test_refresh_installs_a_snapshot() {
        let store = SnapshotStore::new();
        assert!(store.current().await.is_none());

        let source = StubSource {
            result: Ok(vec![row("0xaaa", 5.0), row("0xbbb", 3.0)]),
        };
        let snapshot = store.refresh(&source).await.unwrap();
        assert_eq!(snapshot.events.len(), 2);
        assert_eq!(snapshot.quarantined_rows, 0);
        assert!(snapshot.latest_timestamp.is_some());

        let current = store.current().await.unwrap();
        assert_eq!(current.events.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_upstream_array_is_a_valid_snapshot() {
        let store = SnapshotStore::new();
        let source = StubSource { result: Ok(vec![]) };
        let snapshot = store.refresh(&source).await.unwrap();
        assert!(snapshot.events.is_empty());
        assert!(snapshot.latest_timestamp.is_none());
        assert!(store.current().await.is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_discards_the_previous_snapshot() {
        let store = SnapshotStore::new();
        let good = StubSource {
            result: Ok(vec![row("0xaaa", 5.0)]),
        };
        store.refresh(&good).await.unwrap();
        assert!(store.current().await.is_some());

        let bad = StubSource { result: Err(()) };
        let err = store.refresh(&bad).await.unwrap_err();
        assert!(matches!(err, SnapshotError::UpstreamStatus { status: 500 }));
        // unavailable beats stale
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_superseded_refresh_is_never_installed() {
        let store = SnapshotStore::new();
        let gate = Arc::new(Notify::new());
        let slow = Arc::new(GatedSource {
            gate: gate.clone(),
            rows: vec![row("0xold", 1.0)],
        });

        let racing_store = store.clone();
        let racing_source = slow.clone();
        let slow_refresh =
            tokio::spawn(async move { racing_store.refresh(racing_source.as_ref()).await });
        // let the slow refresh take its ticket and park on the gate
        tokio::task::yield_now().await;

        let fast = StubSource {
            result: Ok(vec![row("0xnew", 2.0)]),
        };
        store.refresh(&fast).await.unwrap();

        gate.notify_one();
        let result = slow_refresh.await.unwrap();
        assert!(matches!(result, Err(SnapshotError::Superseded)));

        let current = store.current().await.unwrap();
        assert_eq!(current.events[0].holder_address, "0xnew");
    }

    #[tokio::test]
    async fn test_malformed_rows_are_counted_not_fatal() {
        let store = SnapshotStore::new();
        let source = StubSource {
            result: Ok(vec![row("0xaaa", 5.0), json!({"allocation": "oops"})]),
        };
        let snapshot = store.refresh(&source).await.unwrap();
        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.quarantined_rows, 1);
    }
}
