//! # Favorites Commands

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// The favorites set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    /// Favorite ids, sorted.
    pub ids: Vec<String>,
    pub count: usize,
}

/// Membership of one product after a change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteChange {
    pub product_id: String,
    pub is_favorite: bool,
    pub count: usize,
}

/// Lists the favorites set.
pub async fn list_favorites(state: &AppState) -> FavoritesResponse {
    debug!("list_favorites command");
    let ids = state.favorites().ids().await;
    FavoritesResponse {
        count: ids.len(),
        ids,
    }
}

/// Stars or unstars a catalog product.
pub async fn toggle_favorite(state: &AppState, product_id: &str) -> Result<FavoriteChange, ApiError> {
    debug!(product_id, "toggle_favorite command");
    state.catalog().require(product_id)?;

    let is_favorite = state.favorites().toggle_favorite(product_id).await;
    Ok(change(state, product_id, is_favorite).await)
}

/// Stars a catalog product. Already-starred products stay starred.
pub async fn add_favorite(state: &AppState, product_id: &str) -> Result<FavoriteChange, ApiError> {
    debug!(product_id, "add_favorite command");
    state.catalog().require(product_id)?;

    state.favorites().add_favorite(product_id).await;
    Ok(change(state, product_id, true).await)
}

/// Unstars a product.
///
/// Ids outside the catalog are accepted so stale favorites can be removed.
pub async fn remove_favorite(state: &AppState, product_id: &str) -> FavoriteChange {
    debug!(product_id, "remove_favorite command");
    state.favorites().remove_favorite(product_id).await;
    change(state, product_id, false).await
}

async fn change(state: &AppState, product_id: &str, is_favorite: bool) -> FavoriteChange {
    FavoriteChange {
        product_id: product_id.to_string(),
        is_favorite,
        count: state.favorites().favorites_count().await,
    }
}
