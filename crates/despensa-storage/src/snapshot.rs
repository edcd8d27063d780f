//! # Snapshot Storage
//!
//! The key-value seam every store persists through, plus the JSON envelope
//! each slot holds.
//!
//! ## Slot Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key                   value                                           │
//! │  ───────────────────   ─────────────────────────────────────────────   │
//! │  despensa-cart         {"state":{"items":[...],"isOpen":false},        │
//! │                         "version":1}                                   │
//! │  despensa-favorites    {"state":{"favorites":["arroz-bomba"]},         │
//! │                         "version":1}                                   │
//! │  despensa-auth         {"state":{"user":{...},"isAuthenticated":true}, │
//! │                         "version":1}                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends store raw strings; encoding is handled by [`save_snapshot`] and
//! [`load_snapshot`] so a backend never depends on the state types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Envelope version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

// =============================================================================
// Storage Trait
// =============================================================================

/// Device-local key-value storage for store snapshots.
///
/// Implementations: [`MemoryStore`] (tests, ephemeral runs) and
/// [`SqliteStore`](crate::SqliteStore) (local database file).
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if the slot is empty.
    async fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Empties the slot. Removing an empty slot is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

// =============================================================================
// Snapshot Envelope
// =============================================================================

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct SnapshotOwned<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Encodes `state` in the snapshot envelope and writes it under `key`.
pub async fn save_snapshot<T>(store: &dyn SnapshotStore, key: &str, state: &T) -> StorageResult<()>
where
    T: Serialize + Sync,
{
    let json = serde_json::to_string(&SnapshotRef {
        state,
        version: SNAPSHOT_VERSION,
    })?;
    store.save(key, &json).await
}

/// Reads and decodes the snapshot under `key`.
///
/// ## Returns
/// - `Ok(None)` when the slot is empty
/// - `Err(VersionMismatch)` when the envelope carries another version
/// - `Err(Serialization)` when the value is not a valid snapshot
pub async fn load_snapshot<T>(store: &dyn SnapshotStore, key: &str) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.load(key).await? else {
        return Ok(None);
    };

    let snapshot: SnapshotOwned<T> = serde_json::from_str(&raw)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StorageError::VersionMismatch {
            key: key.to_string(),
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    Ok(Some(snapshot.state))
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-process storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of occupied slots.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(key, bytes = value.len(), "Saving snapshot to memory");
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Counter {
        value: u32,
        is_open: bool,
    }

    #[tokio::test]
    async fn test_memory_store_basic_ops() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.save("k", "v1").await.unwrap();
        store.save("k", "v2").await.unwrap();
        assert_eq!(store.load("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len().await, 1);

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap(); // idempotent
        assert_eq!(store.load("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_snapshot_envelope_shape() {
        let store = MemoryStore::new();
        let state = Counter {
            value: 3,
            is_open: true,
        };

        save_snapshot(&store, "despensa-test", &state).await.unwrap();

        let raw = store.load("despensa-test").await.unwrap().unwrap();
        assert_eq!(raw, r#"{"state":{"value":3,"isOpen":true},"version":1}"#);

        let restored: Option<Counter> = load_snapshot(&store, "despensa-test").await.unwrap();
        assert_eq!(restored, Some(state));
    }

    #[tokio::test]
    async fn test_load_empty_slot() {
        let store = MemoryStore::new();
        let restored: Option<Counter> = load_snapshot(&store, "missing").await.unwrap();
        assert!(restored.is_none());
    }

    #[tokio::test]
    async fn test_load_rejects_other_versions() {
        let store = MemoryStore::new();
        store
            .save("k", r#"{"state":{"value":1,"isOpen":false},"version":0}"#)
            .await
            .unwrap();

        let err = load_snapshot::<Counter>(&store, "k").await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::VersionMismatch { found: 0, expected: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_garbage() {
        let store = MemoryStore::new();
        store.save("k", "not json").await.unwrap();

        let err = load_snapshot::<Counter>(&store, "k").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
