//! # Catalog Commands
//!
//! Browsing the static product list, annotated with the visitor's cart and
//! favorites.

use despensa_core::Product;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Filters for [`list_products`]. All filters combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// Category tag, case-insensitive.
    pub category: Option<String>,

    /// Substring over name, description and category.
    pub search: Option<String>,

    #[serde(default)]
    pub featured_only: bool,

    #[serde(default)]
    pub in_stock_only: bool,
}

/// A product as shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,

    /// Whether the product is in the favorites set.
    pub is_favorite: bool,

    /// Quantity currently in the cart.
    pub in_cart: i64,
}

async fn view(state: &AppState, product: &Product) -> ProductView {
    ProductView {
        product: product.clone(),
        is_favorite: state.favorites().is_favorite(&product.id).await,
        in_cart: state.cart().quantity_of(&product.id).await,
    }
}

/// Lists products matching `query`, in catalog order.
pub async fn list_products(state: &AppState, query: &CatalogQuery) -> Vec<ProductView> {
    debug!(?query, "list_products command");

    let matches: Vec<&Product> = match query.search {
        Some(ref needle) => state.catalog().search(needle),
        None => state.catalog().products().iter().collect(),
    };

    let mut views = Vec::new();
    for product in matches {
        if let Some(ref category) = query.category {
            if !product.category.eq_ignore_ascii_case(category.trim()) {
                continue;
            }
        }
        if query.featured_only && !product.featured {
            continue;
        }
        if query.in_stock_only && !product.in_stock {
            continue;
        }
        views.push(view(state, product).await);
    }

    views
}

/// Gets one product by id.
pub async fn get_product(state: &AppState, product_id: &str) -> Result<ProductView, ApiError> {
    debug!(product_id, "get_product command");
    let product = state.catalog().require(product_id)?;
    Ok(view(state, product).await)
}

/// Lists the category tags, sorted.
pub fn list_categories(state: &AppState) -> Vec<String> {
    state
        .catalog()
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect()
}
