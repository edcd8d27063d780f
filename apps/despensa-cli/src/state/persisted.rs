//! # Persisted Slot
//!
//! The lock-mutate-persist cycle shared by every store container.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  mutate(f)                                                              │
//! │    │                                                                    │
//! │    ├─► state.write()        exclusive access to the in-memory value    │
//! │    ├─► f(&mut state)        the store operation                         │
//! │    ├─► snapshot = clone                                                 │
//! │    ├─► writes.lock()        queued before the state lock is released   │
//! │    ├─► drop(state)          readers and the next mutation proceed      │
//! │    └─► save_snapshot(..)    failures logged at warn, never returned    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Taking the write queue while still holding the state lock means snapshots
//! reach storage in the same order the mutations happened, so the last
//! persisted value is always the current one.

use std::sync::Arc;

use despensa_storage::{load_snapshot, save_snapshot, SnapshotStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Reads the snapshot under `key`, falling back to `T::default()`.
///
/// A missing slot is normal on first start. An unreadable or foreign-version
/// slot is logged and ignored.
pub(crate) async fn load_or_default<T>(storage: &dyn SnapshotStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match load_snapshot::<T>(storage, key).await {
        Ok(Some(state)) => {
            debug!(key, backend = storage.backend(), "Restored snapshot");
            state
        }
        Ok(None) => {
            debug!(key, "No snapshot stored, starting empty");
            T::default()
        }
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable snapshot, starting empty");
            T::default()
        }
    }
}

/// One store slice plus the storage slot it is persisted to.
pub(crate) struct Persisted<T> {
    key: &'static str,
    state: RwLock<T>,
    writes: Mutex<()>,
    storage: Arc<dyn SnapshotStore>,
}

impl<T> Persisted<T>
where
    T: Clone + Default + Serialize + Send + Sync,
{
    pub(crate) fn new(storage: Arc<dyn SnapshotStore>, key: &'static str, state: T) -> Self {
        Persisted {
            key,
            state: RwLock::new(state),
            writes: Mutex::new(()),
            storage,
        }
    }

    /// Executes a function with read access to the state.
    pub(crate) async fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Executes a function with write access, then persists the result.
    ///
    /// Persists even when `f` left the state unchanged.
    pub(crate) async fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.state.write().await;
        let result = f(&mut state);
        let snapshot = state.clone();

        let _write = self.writes.lock().await;
        drop(state);

        self.persist(&snapshot).await;
        result
    }

    /// Restores the empty state and empties the storage slot.
    pub(crate) async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = T::default();

        let _write = self.writes.lock().await;
        drop(state);

        if let Err(e) = self.storage.remove(self.key).await {
            warn!(key = self.key, error = %e, "Failed to clear snapshot slot");
        }
    }

    async fn persist(&self, snapshot: &T) {
        if let Err(e) = save_snapshot(self.storage.as_ref(), self.key, snapshot).await {
            warn!(
                key = self.key,
                backend = self.storage.backend(),
                error = %e,
                "Failed to persist snapshot, in-memory state kept"
            );
        }
    }
}
