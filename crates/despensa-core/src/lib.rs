//! # despensa-core: Pure State Logic for the Despensa Storefront
//!
//! This crate holds the storefront's client-side state as plain data types
//! with zero I/O. Persistence and the login round-trip live in the app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Despensa Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front End (CLI / storefront UI)                 │   │
//! │  │     Catalog ──► Cart panel ──► Favorites ──► Account            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Store containers (app): lock, mutate, persist          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ despensa-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────────┐    │   │
//! │  │   │ catalog  │ │   cart   │ │favorites │ │      auth      │    │   │
//! │  │   │ Catalog  │ │   Cart   │ │Favorites │ │  AuthSession   │    │   │
//! │  │   │ Product  │ │ CartLine │ │          │ │  UserProfile   │    │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, UserProfile, ProfileUpdate
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Validated read-only product list
//! - [`cart`] - Cart lines, totals, panel flag
//! - [`favorites`] - Favorited product ids
//! - [`auth`] - Logged-in session
//! - [`validation`] - Input and catalog validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use despensa_core::{Cart, Catalog};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut cart = Cart::new();
//!
//! cart.add_item(catalog.require("aceite-oliva-virgen-5l").unwrap(), 2);
//! cart.add_item(catalog.require("jamon-serrano-loncheado").unwrap(), 1);
//!
//! assert_eq!(cart.total_items(), 3);
//! assert_eq!(cart.total_price().to_string(), "82.48");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::AuthSession;
pub use cart::{Cart, CartLine, CartTotals, MAX_QUANTITY};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use favorites::Favorites;
pub use money::Money;
pub use types::*;
