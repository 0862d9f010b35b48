//! Snapshot acquisition for the points engine: an upstream client, an
//! atomically swapped in-memory store, and a periodic refresh task.
//!
//! The store only ever exposes whole snapshots. A refresh that loses the race
//! to a newer one is dropped, and a failed fetch clears the store: consumers
//! see "no data" rather than stale data.

pub mod client;
pub mod error;
pub mod store;
pub mod task;

pub use client::{AllocationSource, AllocationsClient, DEFAULT_UPSTREAM_URL};
pub use error::SnapshotError;
pub use store::{Snapshot, SnapshotStore};
pub use task::RefreshTask;
