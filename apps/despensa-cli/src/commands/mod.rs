//! # Commands Module
//!
//! Front-end commands over [`AppState`](crate::state::AppState).
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Categories                                │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │   catalog.rs    │  │    cart.rs      │  │  favorites.rs   │         │
//! │  │                 │  │                 │  │                 │         │
//! │  │ list_products   │  │ get_cart        │  │ list_favorites  │         │
//! │  │ get_product     │  │ add_to_cart     │  │ toggle_favorite │         │
//! │  │ list_categories │  │ update_cart_item│  │ add_favorite    │         │
//! │  │                 │  │ remove_from_cart│  │ remove_favorite │         │
//! │  │                 │  │ clear_cart      │  │                 │         │
//! │  │                 │  │ toggle_cart     │  │                 │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    auth.rs      │   Every command returns a serializable response   │
//! │  │                 │   (printed as text or with --json) or ApiError.   │
//! │  │ login / logout  │                                                    │
//! │  │ get_session     │                                                    │
//! │  │ update_profile  │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod favorites;
