//! # Repository Module
//!
//! SQL access for the SQLite backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Store container                                                       │
//! │       │  save_snapshot(&store, "despensa-cart", &cart)                 │
//! │       ▼                                                                 │
//! │  SqliteStore (impl SnapshotStore)                                      │
//! │       │  self.snapshots().put(key, json)                               │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                    │
//! │  ├── get(&self, key)                                                   │
//! │  ├── put(&self, key, value)                                            │
//! │  └── delete(&self, key)                                                │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite: snapshots table                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod snapshot;
