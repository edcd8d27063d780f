//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐      add_to_cart       ┌──────────┐                       │
//! │  │  Empty   │ ─────────────────────► │ In Cart  │ ◄─┐ update_cart_item  │
//! │  │  Cart    │ ◄───────────────────── │          │ ──┘ remove_from_cart  │
//! │  └──────────┘  clear_cart, last line └──────────┘                       │
//! │                removed                                                  │
//! │                                                                         │
//! │  toggle_cart flips the panel in either state. There is no checkout.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use despensa_core::validation::{validate_add_quantity, validate_set_quantity};
use despensa_core::{Cart, CartLine, CartTotals};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub is_open: bool,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
            is_open: cart.is_open(),
        }
    }
}

async fn respond(state: &AppState) -> CartResponse {
    CartResponse::from(&state.cart().snapshot().await)
}

/// Gets the current cart contents.
pub async fn get_cart(state: &AppState) -> CartResponse {
    debug!("get_cart command");
    respond(state).await
}

/// Adds a catalog product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line with a frozen product copy
/// - Out-of-stock products are accepted
///
/// ## Errors
/// - `NOT_FOUND` for an id that is not in the catalog
/// - `VALIDATION_ERROR` for `quantity <= 0`, or when the line would end up
///   above `MAX_QUANTITY`
pub async fn add_to_cart(
    state: &AppState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, quantity, "add_to_cart command");

    validate_add_quantity(quantity)?;
    let product = state.catalog().require(product_id)?;
    // Both terms are <= MAX_QUANTITY here
    validate_set_quantity(state.cart().quantity_of(product_id).await + quantity)?;
    state.cart().add_item(product, quantity).await;

    Ok(respond(state).await)
}

/// Sets the quantity of a cart line.
///
/// `quantity <= 0` removes the line. Unknown ids leave the cart unchanged.
///
/// ## Errors
/// `VALIDATION_ERROR` for a quantity above `MAX_QUANTITY`
pub async fn update_cart_item(
    state: &AppState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, quantity, "update_cart_item command");

    validate_set_quantity(quantity)?;
    state.cart().update_quantity(product_id, quantity).await;

    Ok(respond(state).await)
}

/// Removes a line. Unknown ids leave the cart unchanged.
pub async fn remove_from_cart(state: &AppState, product_id: &str) -> CartResponse {
    debug!(product_id, "remove_from_cart command");
    state.cart().remove_item(product_id).await;
    respond(state).await
}

/// Empties the cart.
pub async fn clear_cart(state: &AppState) -> CartResponse {
    debug!("clear_cart command");
    state.cart().clear_cart().await;
    respond(state).await
}

/// Opens or closes the cart panel.
pub async fn toggle_cart(state: &AppState) -> CartResponse {
    debug!("toggle_cart command");
    state.cart().toggle_cart().await;
    respond(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::auth::StubAuthenticator;
    use crate::error::ErrorCode;
    use despensa_core::MAX_QUANTITY;
    use despensa_storage::MemoryStore;

    async fn state() -> AppState {
        AppState::init(
            Arc::new(MemoryStore::new()),
            Arc::new(StubAuthenticator::new(Duration::ZERO)),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_to_cart_totals() {
        let state = state().await;

        add_to_cart(&state, "aceite-oliva-virgen-5l", 2).await.unwrap();
        let cart = add_to_cart(&state, "jamon-serrano-loncheado", 1).await.unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.totals.total_items, 3);
        assert_eq!(cart.totals.total_price.to_string(), "82.48");
        // 2 × (28.99 - 24.99)
        assert_eq!(cart.totals.total_savings.cents(), 800);
    }

    #[tokio::test]
    async fn test_add_rejects_unknown_product_and_bad_quantity() {
        let state = state().await;

        let err = add_to_cart(&state, "caviar", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&state, "arroz-bomba", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(get_cart(&state).await.totals.total_items, 0);
    }

    #[tokio::test]
    async fn test_quantity_bound() {
        let state = state().await;

        let err = add_to_cart(&state, "arroz-bomba", 9_000_000_000_000_000)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&state).await.totals.total_items, 0);

        let cart = add_to_cart(&state, "arroz-bomba", MAX_QUANTITY).await.unwrap();
        assert_eq!(cart.totals.total_price.cents(), 1250 * MAX_QUANTITY);

        // Merging past the bound is rejected, the line keeps its quantity
        let err = add_to_cart(&state, "arroz-bomba", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.cart().quantity_of("arroz-bomba").await, MAX_QUANTITY);

        let err = update_cart_item(&state, "arroz-bomba", MAX_QUANTITY + 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let cart = update_cart_item(&state, "arroz-bomba", 3).await.unwrap();
        assert_eq!(cart.totals.total_items, 3);
    }

    #[tokio::test]
    async fn test_out_of_stock_can_be_added() {
        let state = state().await;
        let cart = add_to_cart(&state, "pimenton-de-la-vera", 1).await.unwrap();
        assert_eq!(cart.totals.line_count, 1);
    }

    #[tokio::test]
    async fn test_update_remove_clear_toggle() {
        let state = state().await;
        add_to_cart(&state, "arroz-bomba", 1).await.unwrap();
        add_to_cart(&state, "vinagre-jerez", 1).await.unwrap();

        let cart = update_cart_item(&state, "arroz-bomba", 6).await.unwrap();
        assert_eq!(cart.totals.total_items, 7);

        let cart = update_cart_item(&state, "arroz-bomba", 0).await.unwrap();
        assert_eq!(cart.totals.line_count, 1);

        let cart = remove_from_cart(&state, "no-existe").await;
        assert_eq!(cart.totals.line_count, 1);

        let cart = toggle_cart(&state).await;
        assert!(cart.is_open);

        let cart = clear_cart(&state).await;
        assert!(cart.items.is_empty());
        assert!(cart.totals.total_price.is_zero());
        assert!(cart.is_open);
    }

    #[tokio::test]
    async fn test_response_json_shape() {
        let state = state().await;
        let cart = add_to_cart(&state, "arroz-bomba", 2).await.unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["isOpen"], false);
        assert_eq!(json["totals"]["totalItems"], 2);
        assert_eq!(json["items"][0]["product"]["id"], "arroz-bomba");
    }
}
