//! # Output
//!
//! Renders command responses as plain text, or as JSON with `--json`.
//! Everything goes to stdout except errors, which go to stderr.

use std::fmt::Write as _;

use serde::Serialize;

use crate::commands::auth::SessionResponse;
use crate::commands::cart::CartResponse;
use crate::commands::catalog::ProductView;
use crate::commands::favorites::{FavoriteChange, FavoritesResponse};
use crate::config::AppConfig;
use crate::error::ApiError;

/// Text renderer for a response type.
pub trait Render {
    fn render(&self, config: &AppConfig) -> String;
}

/// Prints `value` as JSON or rendered text.
pub fn emit<T>(value: &T, config: &AppConfig, json: bool) -> Result<(), ApiError>
where
    T: Render + Serialize + ?Sized,
{
    if json {
        let out = serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))?;
        println!("{}", out);
    } else {
        print!("{}", value.render(config));
    }
    Ok(())
}

/// Prints an error to stderr.
pub fn print_error(err: &ApiError, json: bool) {
    if json {
        match serde_json::to_string(err) {
            Ok(out) => eprintln!("{}", out),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("error: {}", err.message);
    }
}

// =============================================================================
// Renderers
// =============================================================================

impl Render for [ProductView] {
    fn render(&self, config: &AppConfig) -> String {
        if self.is_empty() {
            return "No products match.\n".to_string();
        }

        let mut out = String::new();
        for view in self {
            let product = &view.product;
            let mut flags = Vec::new();
            if view.is_favorite {
                flags.push("★".to_string());
            }
            if !product.in_stock {
                flags.push("out of stock".to_string());
            }
            if let Some(pct) = product.discount_percentage.filter(|pct| *pct > 0) {
                flags.push(format!("-{}%", pct));
            }
            if view.in_cart > 0 {
                flags.push(format!("in cart: {}", view.in_cart));
            }

            let _ = writeln!(
                out,
                "{:<26} {:<34} {:>10} / {:<12} {}",
                product.id,
                product.name,
                config.format_currency(product.price()),
                product.unit,
                flags.join(" ")
            );
        }
        out
    }
}

impl Render for ProductView {
    fn render(&self, config: &AppConfig) -> String {
        let product = &self.product;
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", product.name, product.id);
        let _ = writeln!(out, "  category: {}", product.category);
        let _ = write!(out, "  price:    {} / {}", config.format_currency(product.price()), product.unit);
        if let Some(original) = product.original_price().filter(|o| *o > product.price()) {
            let _ = write!(out, " (was {})", config.format_currency(original));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "  in stock: {}", if product.in_stock { "yes" } else { "no" });
        if !product.description.is_empty() {
            let _ = writeln!(out, "  {}", product.description);
        }
        if self.is_favorite {
            let _ = writeln!(out, "  ★ favorite");
        }
        if self.in_cart > 0 {
            let _ = writeln!(out, "  in cart: {}", self.in_cart);
        }
        out
    }
}

impl Render for [String] {
    fn render(&self, _config: &AppConfig) -> String {
        self.iter().map(|s| format!("{}\n", s)).collect()
    }
}

impl Render for CartResponse {
    fn render(&self, config: &AppConfig) -> String {
        let mut out = String::new();
        let panel = if self.is_open { "open" } else { "closed" };

        if self.items.is_empty() {
            let _ = writeln!(out, "Cart is empty. (panel {})", panel);
            return out;
        }

        for line in &self.items {
            let _ = writeln!(
                out,
                "{:<34} x{:<4} {:>12}",
                line.product.name,
                line.quantity,
                config.format_currency(line.line_total())
            );
        }
        let _ = writeln!(out, "{}", "─".repeat(53));
        let _ = writeln!(
            out,
            "{:<34} {:<5} {:>12}",
            "Total",
            self.totals.total_items,
            config.format_currency(self.totals.total_price)
        );
        if self.totals.total_savings.is_positive() {
            let _ = writeln!(
                out,
                "{:<40} {:>12}",
                "Savings",
                config.format_currency(self.totals.total_savings)
            );
        }
        let _ = writeln!(out, "(panel {})", panel);
        out
    }
}

impl Render for FavoritesResponse {
    fn render(&self, _config: &AppConfig) -> String {
        if self.ids.is_empty() {
            return "No favorites yet.\n".to_string();
        }
        let mut out = String::new();
        for id in &self.ids {
            let _ = writeln!(out, "★ {}", id);
        }
        let _ = writeln!(out, "{} favorite(s)", self.count);
        out
    }
}

impl Render for FavoriteChange {
    fn render(&self, _config: &AppConfig) -> String {
        let verb = if self.is_favorite { "added to" } else { "removed from" };
        format!("{} {} favorites ({} total)\n", self.product_id, verb, self.count)
    }
}

impl Render for SessionResponse {
    fn render(&self, _config: &AppConfig) -> String {
        match self.user {
            Some(ref user) => format!(
                "Logged in as {} <{}>\n  company: {}\n  phone:   {}\n",
                user.name, user.email, user.company, user.phone
            ),
            None => "Not logged in.\n".to_string(),
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message {
            message: message.into(),
        }
    }
}

impl Render for Message {
    fn render(&self, _config: &AppConfig) -> String {
        format!("{}\n", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use despensa_core::{Cart, Catalog};

    #[test]
    fn test_cart_render_shows_total() {
        let catalog = Catalog::builtin().unwrap();
        let mut cart = Cart::new();
        cart.add_item(catalog.require("aceite-oliva-virgen-5l").unwrap(), 2);
        cart.add_item(catalog.require("jamon-serrano-loncheado").unwrap(), 1);

        let text = CartResponse::from(&cart).render(&AppConfig::default());

        assert!(text.contains("82.48 €"));
        assert!(text.contains("Savings"));
        assert!(text.contains("(panel closed)"));
    }

    #[test]
    fn test_empty_renders() {
        let config = AppConfig::default();
        assert!(CartResponse::from(&Cart::new()).render(&config).contains("empty"));

        let empty: Vec<ProductView> = Vec::new();
        assert_eq!(empty.render(&config), "No products match.\n");

        let session = SessionResponse {
            is_authenticated: false,
            user: None,
        };
        assert_eq!(session.render(&config), "Not logged in.\n");
    }
}
