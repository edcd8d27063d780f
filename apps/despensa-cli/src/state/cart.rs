//! # Cart Store
//!
//! Shared cart state, persisted under `despensa-cart` after every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Front End Action         Store Method            Persisted?            │
//! │  ────────────────         ────────────            ──────────            │
//! │                                                                         │
//! │  Click "Añadir" ────────► add_item() ───────────► yes                  │
//! │  Change Quantity ───────► update_quantity() ────► yes                  │
//! │  Click Remove ──────────► remove_item() ────────► yes                  │
//! │  Click "Vaciar" ────────► clear_cart() ─────────► yes                  │
//! │  Cart Icon ─────────────► toggle_cart() ────────► yes                  │
//! │  Badge / Summary ───────► totals() ─────────────► no (read lock only)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use despensa_core::{Cart, CartLine, CartTotals, Money, Product};
use despensa_storage::SnapshotStore;
use tracing::debug;

use super::persisted::{load_or_default, Persisted};
use super::CART_KEY;

/// Cart container shared by all commands.
pub struct CartStore {
    cart: Persisted<Cart>,
}

impl CartStore {
    /// Restores the cart from storage, or starts empty.
    pub async fn restore(storage: Arc<dyn SnapshotStore>) -> Self {
        let mut cart: Cart = load_or_default(storage.as_ref(), CART_KEY).await;
        cart.normalize();
        debug!(
            lines = cart.line_count(),
            is_open = cart.is_open(),
            "Cart restored"
        );

        CartStore {
            cart: Persisted::new(storage, CART_KEY, cart),
        }
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    pub async fn add_item(&self, product: &Product, quantity: i64) -> bool {
        let changed = self.cart.mutate(|c| c.add_item(product, quantity)).await;
        debug!(product_id = %product.id, quantity, changed, "add_item");
        changed
    }

    /// Removes the line for `product_id`, if any.
    pub async fn remove_item(&self, product_id: &str) -> bool {
        let changed = self.cart.mutate(|c| c.remove_item(product_id)).await;
        debug!(product_id, changed, "remove_item");
        changed
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    pub async fn update_quantity(&self, product_id: &str, quantity: i64) -> bool {
        let changed = self
            .cart
            .mutate(|c| c.update_quantity(product_id, quantity))
            .await;
        debug!(product_id, quantity, changed, "update_quantity");
        changed
    }

    /// Empties the cart. The panel flag is kept.
    pub async fn clear_cart(&self) {
        self.cart.mutate(Cart::clear).await;
        debug!("clear_cart");
    }

    /// Flips the panel flag and returns the new value.
    pub async fn toggle_cart(&self) -> bool {
        let is_open = self.cart.mutate(Cart::toggle).await;
        debug!(is_open, "toggle_cart");
        is_open
    }

    pub async fn total_items(&self) -> i64 {
        self.cart.read(Cart::total_items).await
    }

    pub async fn total_price(&self) -> Money {
        self.cart.read(Cart::total_price).await
    }

    pub async fn totals(&self) -> CartTotals {
        self.cart.read(|c| CartTotals::from(c)).await
    }

    pub async fn is_open(&self) -> bool {
        self.cart.read(Cart::is_open).await
    }

    /// Quantity of `product_id` in the cart, 0 when absent.
    pub async fn quantity_of(&self, product_id: &str) -> i64 {
        self.cart
            .read(|c| c.line(product_id).map_or(0, |l| l.quantity))
            .await
    }

    /// Lines in insertion order.
    pub async fn lines(&self) -> Vec<CartLine> {
        self.cart.read(|c| c.lines().to_vec()).await
    }

    /// A copy of the whole cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.read(Cart::clone).await
    }

    pub(crate) async fn reset(&self) {
        self.cart.reset().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use despensa_core::{Catalog, MAX_QUANTITY};
    use despensa_storage::{load_snapshot, MemoryStore};

    fn product(id: &str) -> Product {
        Catalog::builtin().unwrap().require(id).unwrap().clone()
    }

    #[tokio::test]
    async fn test_every_mutation_is_persisted() {
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::restore(storage.clone()).await;

        store.add_item(&product("aceite-oliva-virgen-5l"), 2).await;
        let saved: Cart = load_snapshot(storage.as_ref(), CART_KEY).await.unwrap().unwrap();
        assert_eq!(saved.total_items(), 2);

        store.toggle_cart().await;
        let saved: Cart = load_snapshot(storage.as_ref(), CART_KEY).await.unwrap().unwrap();
        assert!(saved.is_open());

        store.clear_cart().await;
        let saved: Cart = load_snapshot(storage.as_ref(), CART_KEY).await.unwrap().unwrap();
        assert!(saved.is_empty());
        assert!(saved.is_open());
    }

    #[tokio::test]
    async fn test_restore_reproduces_cart() {
        let storage = Arc::new(MemoryStore::new());

        let store = CartStore::restore(storage.clone()).await;
        store.add_item(&product("aceite-oliva-virgen-5l"), 2).await;
        store.add_item(&product("jamon-serrano-loncheado"), 1).await;
        store.toggle_cart().await;
        let before = store.snapshot().await;

        let restored = CartStore::restore(storage).await;

        assert_eq!(restored.snapshot().await, before);
        assert_eq!(restored.total_price().await, Money::from_cents(8248));
        assert!(restored.is_open().await);
    }

    #[tokio::test]
    async fn test_totals_and_quantities() {
        let store = CartStore::restore(Arc::new(MemoryStore::new())).await;

        store.add_item(&product("arroz-bomba"), 3).await;
        store.update_quantity("arroz-bomba", 5).await;

        assert_eq!(store.quantity_of("arroz-bomba").await, 5);
        assert_eq!(store.quantity_of("vinagre-jerez").await, 0);
        assert_eq!(store.totals().await.total_price.cents(), 6250);

        assert!(store.update_quantity("arroz-bomba", 0).await);
        assert_eq!(store.total_items().await, 0);
        assert!(store.lines().await.is_empty());
    }

    #[tokio::test]
    async fn test_restore_caps_oversized_quantity() {
        let storage = Arc::new(MemoryStore::new());
        let mut cart = Cart::new();
        cart.add_item(&product("arroz-bomba"), 1);
        let mut state = serde_json::to_value(&cart).unwrap();
        state["items"][0]["quantity"] = serde_json::json!(9_000_000_000_000_000_000i64);
        storage
            .save(CART_KEY, &serde_json::json!({ "state": state, "version": 1 }).to_string())
            .await
            .unwrap();

        let store = CartStore::restore(storage).await;
        store.add_item(&product("arroz-bomba"), 1).await;

        assert_eq!(store.quantity_of("arroz-bomba").await, MAX_QUANTITY);
        assert_eq!(store.total_price().await.cents(), 1250 * MAX_QUANTITY);
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let store = CartStore::restore(Arc::new(MemoryStore::new())).await;
        store.add_item(&product("arroz-bomba"), 1).await;
        let before = store.snapshot().await;

        assert!(!store.remove_item("no-existe").await);
        assert_eq!(store.snapshot().await, before);
    }
}
