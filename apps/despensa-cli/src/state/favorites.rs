//! # Favorites Store
//!
//! Shared favorites set, persisted under `despensa-favorites` after every
//! mutation.

use std::sync::Arc;

use despensa_core::Favorites;
use despensa_storage::SnapshotStore;
use tracing::debug;

use super::persisted::{load_or_default, Persisted};
use super::FAVORITES_KEY;

/// Favorites container shared by all commands.
pub struct FavoritesStore {
    favorites: Persisted<Favorites>,
}

impl FavoritesStore {
    /// Restores the favorites from storage, or starts empty.
    pub async fn restore(storage: Arc<dyn SnapshotStore>) -> Self {
        let favorites: Favorites = load_or_default(storage.as_ref(), FAVORITES_KEY).await;
        debug!(count = favorites.len(), "Favorites restored");

        FavoritesStore {
            favorites: Persisted::new(storage, FAVORITES_KEY, favorites),
        }
    }

    /// Adds `id` if absent, removes it otherwise.
    ///
    /// ## Returns
    /// Whether `id` is a favorite after the call.
    pub async fn toggle_favorite(&self, id: &str) -> bool {
        let is_favorite = self.favorites.mutate(|f| f.toggle(id)).await;
        debug!(product_id = id, is_favorite, "toggle_favorite");
        is_favorite
    }

    pub async fn add_favorite(&self, id: &str) -> bool {
        let changed = self.favorites.mutate(|f| f.add(id)).await;
        debug!(product_id = id, changed, "add_favorite");
        changed
    }

    pub async fn remove_favorite(&self, id: &str) -> bool {
        let changed = self.favorites.mutate(|f| f.remove(id)).await;
        debug!(product_id = id, changed, "remove_favorite");
        changed
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.favorites.read(|f| f.contains(id)).await
    }

    pub async fn favorites_count(&self) -> usize {
        self.favorites.read(Favorites::len).await
    }

    /// Favorite ids in sorted order.
    pub async fn ids(&self) -> Vec<String> {
        self.favorites
            .read(|f| f.ids().map(str::to_string).collect())
            .await
    }

    pub async fn clear(&self) {
        self.favorites.mutate(Favorites::clear).await;
        debug!("clear_favorites");
    }

    pub(crate) async fn reset(&self) {
        self.favorites.reset().await;
    }
}
