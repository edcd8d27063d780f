//! # Domain Types
//!
//! Catalog and account types shared by the stores and the front end.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────────┐         ┌─────────────────────────┐       │
//! │  │        Product          │         │      UserProfile        │       │
//! │  │  ─────────────────────  │         │  ─────────────────────  │       │
//! │  │  id (unique in catalog) │         │  id                     │       │
//! │  │  category               │         │  name, email            │       │
//! │  │  price_cents (optional) │         │  company, phone         │       │
//! │  │  original_price_cents   │         └───────────┬─────────────┘       │
//! │  │  discount_percentage    │                     │ merged by           │
//! │  │  unit, description      │         ┌───────────▼─────────────┐       │
//! │  │  image, in_stock        │         │     ProfileUpdate       │       │
//! │  │  featured               │         │  (every field optional) │       │
//! │  └─────────────────────────┘         └─────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Products are read-only reference data: the stores copy them into cart
/// lines but never mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Identifier, unique within the catalog.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category tag (e.g. "aceites", "conservas").
    pub category: String,

    /// Price in cents. `None` is treated as zero in every total.
    #[serde(default)]
    pub price_cents: Option<i64>,

    /// Price before discount, in cents.
    #[serde(default)]
    pub original_price_cents: Option<i64>,

    /// Advertised discount percentage (0-100).
    #[serde(default)]
    pub discount_percentage: Option<u8>,

    /// Unit label shown next to the price ("caja 12 ud", "kg").
    pub unit: String,

    /// Long description.
    pub description: String,

    /// Image reference (path or URL).
    pub image: String,

    /// Whether the product can currently be ordered.
    pub in_stock: bool,

    /// Whether the product is highlighted on the landing page.
    pub featured: bool,
}

impl Product {
    /// Returns the unit price, treating a missing price as zero.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents.unwrap_or(0))
    }

    /// Returns the original (pre-discount) price if one is listed.
    #[inline]
    pub fn original_price(&self) -> Option<Money> {
        self.original_price_cents.map(Money::from_cents)
    }

    /// Per-unit saving against the original price.
    ///
    /// Zero when there is no original price or it is not above the price.
    pub fn unit_savings(&self) -> Money {
        match self.original_price() {
            Some(original) if original > self.price() => original - self.price(),
            _ => Money::zero(),
        }
    }

    /// Checks if the product is advertised as discounted.
    pub fn is_discounted(&self) -> bool {
        self.discount_percentage.is_some_and(|pct| pct > 0) || self.unit_savings().is_positive()
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The logged-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
}

impl UserProfile {
    /// Merges the fields present in `update` into this profile.
    ///
    /// The id is never changed by an update.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(company) = update.company {
            self.company = company;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
    }
}

/// Partial profile: only the `Some` fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    /// Checks if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.company.is_none() && self.phone.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Option<i64>, original: Option<i64>) -> Product {
        Product {
            id: "queso-manchego".to_string(),
            name: "Queso manchego curado".to_string(),
            category: "lacteos".to_string(),
            price_cents: price,
            original_price_cents: original,
            discount_percentage: None,
            unit: "pieza 3 kg".to_string(),
            description: String::new(),
            image: String::new(),
            in_stock: true,
            featured: false,
        }
    }

    #[test]
    fn test_missing_price_is_zero() {
        assert!(product(None, None).price().is_zero());
        assert_eq!(product(Some(2499), None).price().cents(), 2499);
    }

    #[test]
    fn test_unit_savings() {
        assert_eq!(product(Some(2499), Some(2999)).unit_savings().cents(), 500);
        assert!(product(Some(2499), None).unit_savings().is_zero());
        // An original price below the price is not a saving
        assert!(product(Some(2499), Some(1999)).unit_savings().is_zero());
    }

    #[test]
    fn test_is_discounted() {
        assert!(product(Some(2499), Some(2999)).is_discounted());
        assert!(!product(Some(2499), None).is_discounted());

        let mut flagged = product(Some(2499), None);
        flagged.discount_percentage = Some(10);
        assert!(flagged.is_discounted());
    }

    #[test]
    fn test_profile_apply_merges_present_fields() {
        let mut profile = UserProfile {
            id: "1".to_string(),
            name: "Cliente Demo".to_string(),
            email: "cliente@example.com".to_string(),
            company: "Restaurante Demo".to_string(),
            phone: "+34 600 000 000".to_string(),
        };

        profile.apply(ProfileUpdate {
            phone: Some("+34 611 111 111".to_string()),
            ..Default::default()
        });

        assert_eq!(profile.phone, "+34 611 111 111");
        assert_eq!(profile.name, "Cliente Demo");
        assert_eq!(profile.id, "1");
    }

    #[test]
    fn test_profile_update_skips_absent_fields() {
        let update = ProfileUpdate {
            company: Some("Bar Central".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"company":"Bar Central"}"#);
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }
}
