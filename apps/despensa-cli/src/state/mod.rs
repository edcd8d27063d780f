//! # State Module
//!
//! Store containers for the storefront, built once per process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState::init(storage, authenticator)                                │
//! │       │  restores each slot independently                              │
//! │       │                                                                 │
//! │       ├──────────────────┬──────────────────┬──────────────────┐       │
//! │       ▼                  ▼                  ▼                  ▼       │
//! │  ┌──────────┐    ┌──────────────┐   ┌──────────────┐   ┌───────────┐   │
//! │  │ Catalog  │    │  CartStore   │   │FavoritesStore│   │ AuthStore │   │
//! │  │(read-only│    │ despensa-cart│   │ despensa-    │   │ despensa- │   │
//! │  │  data)   │    │              │   │  favorites   │   │   auth    │   │
//! │  └──────────┘    └──────────────┘   └──────────────┘   └───────────┘   │
//! │                         │                  │                  │        │
//! │                         └──────────────────┴──────────────────┘        │
//! │                                    │ save_snapshot after each mutation │
//! │                                    ▼                                    │
//! │                          Arc<dyn SnapshotStore>                        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Each store guards its slice with a tokio RwLock                     │
//! │  • Stores are independent; no operation locks two of them             │
//! │  • Catalog: read-only after initialization                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod favorites;
mod persisted;

use std::sync::Arc;

use despensa_core::{Catalog, CoreResult};
use despensa_storage::SnapshotStore;
use tracing::info;

use crate::auth::Authenticator;

pub use auth::AuthStore;
pub use cart::CartStore;
pub use favorites::FavoritesStore;

/// Storage slot of the cart snapshot.
pub const CART_KEY: &str = "despensa-cart";

/// Storage slot of the favorites snapshot.
pub const FAVORITES_KEY: &str = "despensa-favorites";

/// Storage slot of the session snapshot.
pub const AUTH_KEY: &str = "despensa-auth";

/// Every store plus the catalog they draw products from.
pub struct AppState {
    catalog: Catalog,
    storage: Arc<dyn SnapshotStore>,
    cart: CartStore,
    favorites: FavoritesStore,
    auth: AuthStore,
}

impl AppState {
    /// Builds the state over the built-in catalog.
    pub async fn init(
        storage: Arc<dyn SnapshotStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> CoreResult<Self> {
        let catalog = Catalog::builtin()?;
        Ok(Self::with_catalog(catalog, storage, authenticator).await)
    }

    /// Builds the state over a given catalog, restoring every store.
    pub async fn with_catalog(
        catalog: Catalog,
        storage: Arc<dyn SnapshotStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let cart = CartStore::restore(storage.clone()).await;
        let favorites = FavoritesStore::restore(storage.clone()).await;
        let auth = AuthStore::restore(storage.clone(), authenticator).await;

        info!(
            backend = storage.backend(),
            products = catalog.len(),
            "State initialized"
        );

        AppState {
            catalog,
            storage,
            cart,
            favorites,
            auth,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Name of the storage backend in use.
    pub fn storage_backend(&self) -> &'static str {
        self.storage.backend()
    }

    /// Empties every store in memory and in storage.
    pub async fn reset(&self) {
        self.cart.reset().await;
        self.favorites.reset().await;
        self.auth.reset().await;
        info!("All stores reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use despensa_core::Money;
    use despensa_storage::{MemoryStore, StorageError, StorageResult};

    use crate::auth::{StubAuthenticator, DEMO_EMAIL, DEMO_PASSWORD};

    /// Storage whose writes always fail.
    struct FailingStore;

    #[async_trait]
    impl SnapshotStore for FailingStore {
        async fn load(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        async fn save(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Internal("disk full".to_string()))
        }

        async fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Internal("disk full".to_string()))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn instant_auth() -> Arc<dyn Authenticator> {
        Arc::new(StubAuthenticator::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_full_round_trip() {
        let storage = Arc::new(MemoryStore::new());

        let state = AppState::init(storage.clone(), instant_auth()).await.unwrap();
        let aceite = state.catalog().require("aceite-oliva-virgen-5l").unwrap().clone();
        let jamon = state.catalog().require("jamon-serrano-loncheado").unwrap().clone();
        state.cart().add_item(&aceite, 2).await;
        state.cart().add_item(&jamon, 1).await;
        state.cart().toggle_cart().await;
        state.favorites().toggle_favorite("arroz-bomba").await;
        assert!(state.auth().login(DEMO_EMAIL, DEMO_PASSWORD).await);

        let restored = AppState::init(storage, instant_auth()).await.unwrap();

        assert_eq!(restored.cart().snapshot().await, state.cart().snapshot().await);
        assert_eq!(restored.cart().total_price().await, Money::from_cents(8248));
        assert!(restored.favorites().is_favorite("arroz-bomba").await);
        assert_eq!(restored.auth().session().await, state.auth().session().await);
    }

    #[tokio::test]
    async fn test_persistence_failures_do_not_reach_callers() {
        let state = AppState::init(Arc::new(FailingStore), instant_auth())
            .await
            .unwrap();
        let arroz = state.catalog().require("arroz-bomba").unwrap().clone();

        assert!(state.cart().add_item(&arroz, 2).await);
        assert!(state.favorites().toggle_favorite("arroz-bomba").await);
        assert!(state.auth().login(DEMO_EMAIL, DEMO_PASSWORD).await);
        state.reset().await;

        assert_eq!(state.cart().total_items().await, 0);
        assert_eq!(state.storage_backend(), "failing");
    }

    #[tokio::test]
    async fn test_unreadable_slots_start_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.save(CART_KEY, "{not json").await.unwrap();
        storage
            .save(FAVORITES_KEY, r#"{"state":{"favorites":["a"]},"version":7}"#)
            .await
            .unwrap();

        let state = AppState::init(storage, instant_auth()).await.unwrap();

        assert_eq!(state.cart().total_items().await, 0);
        assert_eq!(state.favorites().favorites_count().await, 0);
        assert!(!state.auth().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_reset_clears_memory_and_storage() {
        let storage = Arc::new(MemoryStore::new());
        let state = AppState::init(storage.clone(), instant_auth()).await.unwrap();
        let arroz = state.catalog().require("arroz-bomba").unwrap().clone();
        state.cart().add_item(&arroz, 1).await;
        state.favorites().add_favorite("arroz-bomba").await;
        state.auth().login(DEMO_EMAIL, DEMO_PASSWORD).await;
        assert_eq!(storage.len().await, 3);

        state.reset().await;

        assert!(storage.is_empty().await);
        assert!(state.cart().lines().await.is_empty());
        assert_eq!(state.favorites().favorites_count().await, 0);
        assert!(!state.auth().is_authenticated().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mutations_persist_last_state() {
        let storage = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::init(storage.clone(), instant_auth()).await.unwrap());
        let ids = ["arroz-bomba", "vinagre-jerez", "harina-trigo-panadera"];

        let mut handles = Vec::new();
        for i in 0..30 {
            let state = state.clone();
            let id = ids[i % ids.len()];
            handles.push(tokio::spawn(async move {
                let product = state.catalog().require(id).unwrap().clone();
                state.cart().add_item(&product, 1).await;
                state.favorites().toggle_favorite(id).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let restored = AppState::init(storage, instant_auth()).await.unwrap();
        assert_eq!(restored.cart().snapshot().await, state.cart().snapshot().await);
        assert_eq!(restored.cart().total_items().await, 30);
        assert_eq!(restored.favorites().ids().await, state.favorites().ids().await);
    }
}
