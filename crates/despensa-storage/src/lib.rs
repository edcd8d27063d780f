//! # despensa-storage: Snapshot Persistence for Despensa
//!
//! Device-local key-value storage for the storefront's store snapshots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Despensa Data Flow                               │
//! │                                                                         │
//! │  Store container (cart.add_item → persist)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 despensa-storage (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐     │   │
//! │  │   │ SnapshotStore │   │  SqliteStore  │   │  Migrations  │     │   │
//! │  │   │ (snapshot.rs) │◄──│  (pool.rs)    │   │  (embedded)  │     │   │
//! │  │   │               │   │ SnapshotRepo  │   │ 001_*.sql    │     │   │
//! │  │   │ MemoryStore   │   └───────────────┘   └──────────────┘     │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  despensa.db in the platform data directory                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`snapshot`] - Storage trait, snapshot envelope, in-memory backend
//! - [`pool`] - SQLite pool and backend
//! - [`migrations`] - Embedded migrations
//! - [`repository`] - SQL for the `snapshots` table
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use despensa_storage::{load_snapshot, save_snapshot, SqliteStore, StorageConfig};
//!
//! let store = SqliteStore::new(StorageConfig::new("despensa.db")).await?;
//! save_snapshot(&store, "despensa-cart", &cart).await?;
//! let cart: Option<Cart> = load_snapshot(&store, "despensa-cart").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod snapshot;

pub use error::{StorageError, StorageResult};
pub use pool::{SqliteStore, StorageConfig};
pub use repository::snapshot::SnapshotRepository;
pub use snapshot::{load_snapshot, save_snapshot, MemoryStore, SnapshotStore, SNAPSHOT_VERSION};
