//! # Cart
//!
//! The shopping cart: line items plus the open/closed flag of the cart panel.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Front End Action         Cart Method              State Change         │
//! │  ────────────────         ───────────              ────────────         │
//! │                                                                         │
//! │  Click "Añadir" ────────► add_item() ────────────► push or qty += n    │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ─────► qty = n (<= 0: rm)  │
//! │                                                                         │
//! │  Click Remove ──────────► remove_item() ─────────► lines.retain(..)    │
//! │                                                                         │
//! │  Click "Vaciar" ────────► clear() ───────────────► lines.clear()       │
//! │                                                                         │
//! │  Cart Icon ─────────────► toggle() ──────────────► is_open = !is_open  │
//! │                                                                         │
//! │  Badge / Summary ───────► total_items(), total_price() (read only)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is total: unknown product ids and non-positive quantities
//! never produce errors, they leave the cart as it was (or remove the line).
//! Line quantities are capped at [`MAX_QUANTITY`]; larger requests are
//! clamped here and rejected earlier by the command layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// Largest quantity a single cart line can hold.
pub const MAX_QUANTITY: i64 = 9_999;

/// A line in the cart.
///
/// ## Design Notes
/// The product is copied in when the line is created. The cart keeps showing
/// the same name and price even if the catalog changes before the next
/// visit, and a restored snapshot needs no catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Frozen copy of the product at the time it was added.
    pub product: Product,

    /// Quantity in cart, always within `1..=MAX_QUANTITY`.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line from a product and quantity.
    pub fn new(product: &Product, quantity: i64) -> Self {
        CartLine {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The product id this line belongs to.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price (missing price counts as zero).
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price()
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Saving against the original price for the whole line.
    pub fn line_savings(&self) -> Money {
        self.product.unit_savings().multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product bumps quantity)
/// - Every stored quantity is in `1..=MAX_QUANTITY`
/// - Line order is insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Lines in insertion order.
    #[serde(default)]
    items: Vec<CartLine>,

    /// Whether the cart panel is open.
    #[serde(default)]
    is_open: bool,
}

impl Cart {
    /// Creates a new empty, closed cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` of a product, merging with an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by `quantity`
    /// - Product not in cart: a new line is appended
    /// - `quantity <= 0`: no-op
    /// - The resulting quantity is clamped to `MAX_QUANTITY`
    ///
    /// Stock is not checked; the front end disables the button instead.
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }

        if let Some(line) = self.line_mut(&product.id) {
            let before = line.quantity;
            line.quantity = before.saturating_add(quantity).min(MAX_QUANTITY);
            return line.quantity != before;
        }

        self.items
            .push(CartLine::new(product, quantity.min(MAX_QUANTITY)));
        true
    }

    /// Removes the line for `product_id`.
    ///
    /// ## Returns
    /// `true` if a line was removed, `false` if the product was not in the cart.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|l| l.product_id() != product_id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as `remove_item`
    /// - `quantity > MAX_QUANTITY`: set to `MAX_QUANTITY`
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity.min(MAX_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Removes every line. The panel flag is left as is.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Flips the panel open/closed flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Whether the cart panel is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// The line for `product_id`, if any.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.items.iter_mut().find(|l| l.product_id() == product_id)
    }

    /// Checks if a product has a line in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        self.line(product_id).is_some()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Sum of savings against original prices over all lines.
    pub fn total_savings(&self) -> Money {
        self.items.iter().map(CartLine::line_savings).sum()
    }

    /// Drops lines whose quantity is not positive and caps the rest at
    /// `MAX_QUANTITY`.
    ///
    /// Used when restoring a snapshot written by something other than this
    /// type, so the quantity invariant holds for whatever was stored.
    pub fn normalize(&mut self) {
        self.items.retain(|l| l.quantity > 0);
        for line in &mut self.items {
            line.quantity = line.quantity.min(MAX_QUANTITY);
        }
    }
}

/// Cart summary for badges and the checkout panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total_price: Money,
    pub total_savings: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_savings: cart.total_savings(),
        }
    }
}
