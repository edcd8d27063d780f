//! # Validation Module
//!
//! Input validation for catalog data and front-end input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog construction                                         │
//! │  └── Product ids unique and non-empty, prices and discounts sane       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Front end (CLI)                                              │
//! │  └── Quantities parsed and bounded before they reach the cart          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  └── Total operations: bad ids are no-ops, never errors                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::MAX_QUANTITY;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product id.
const MAX_PRODUCT_ID_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Only letters, numbers, hyphens and underscores
///
/// ## Example
/// ```rust
/// use despensa_core::validation::validate_product_id;
///
/// assert!(validate_product_id("aceite-oliva-5l").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("has space").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
pub fn validate_discount_percentage(pct: u8) -> ValidationResult<()> {
    if pct > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount percentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Parses a quantity typed by the user.
///
/// ## Rules
/// - Must be an integer
/// - Zero and negative values are accepted here: the cart decides what they
///   mean (`update_quantity` with `<= 0` removes the line)
///
/// ## Example
/// ```rust
/// use despensa_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
/// assert_eq!(parse_quantity("0").unwrap(), 0);
/// assert!(parse_quantity("tres").is_err());
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: e.to_string(),
        })
}

/// Validates a quantity for adding to the cart.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_QUANTITY`
pub fn validate_add_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into());
    }

    validate_set_quantity(qty)
}

/// Validates a quantity a cart line is set to.
///
/// ## Rules
/// - Must not exceed `MAX_QUANTITY`
/// - Zero and negative values pass: they remove the line
///
/// ## Example
/// ```rust
/// use despensa_core::validation::validate_set_quantity;
/// use despensa_core::MAX_QUANTITY;
///
/// assert!(validate_set_quantity(0).is_ok());
/// assert!(validate_set_quantity(MAX_QUANTITY).is_ok());
/// assert!(validate_set_quantity(MAX_QUANTITY + 1).is_err());
/// ```
pub fn validate_set_quantity(qty: i64) -> CoreResult<()> {
    if qty > MAX_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: qty,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a single catalog product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if let Some(cents) = product.price_cents {
        validate_price_cents(cents)?;
    }
    if let Some(cents) = product.original_price_cents {
        validate_price_cents(cents)?;
    }
    if let Some(pct) = product.discount_percentage {
        validate_discount_percentage(pct)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Arroz bomba".to_string(),
            category: "despensa".to_string(),
            price_cents: Some(1250),
            original_price_cents: None,
            discount_percentage: None,
            unit: "saco 5 kg".to_string(),
            description: String::new(),
            image: String::new(),
            in_stock: true,
            featured: false,
        }
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("arroz-bomba").is_ok());
        assert!(validate_product_id("SKU_001").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id("has space").is_err());
        assert!(validate_product_id(&"a".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(2499).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_discount_percentage() {
        assert!(validate_discount_percentage(0).is_ok());
        assert!(validate_discount_percentage(100).is_ok());
        assert!(validate_discount_percentage(101).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5").unwrap(), 5);
        assert_eq!(parse_quantity("-2").unwrap(), -2);
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("2.5").is_err());
    }

    #[test]
    fn test_validate_add_quantity() {
        assert!(validate_add_quantity(1).is_ok());
        assert!(validate_add_quantity(0).is_err());
        assert!(validate_add_quantity(-3).is_err());
        assert!(validate_add_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_add_quantity(MAX_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { requested, max })
                if requested == MAX_QUANTITY + 1 && max == MAX_QUANTITY
        ));
        assert!(validate_add_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_set_quantity() {
        assert!(validate_set_quantity(-1).is_ok());
        assert!(validate_set_quantity(0).is_ok());
        assert!(validate_set_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_set_quantity(MAX_QUANTITY + 1).is_err());
        assert!(validate_set_quantity(9_000_000_000_000_000_000).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product("arroz-bomba")).is_ok());

        let mut unnamed = product("arroz-bomba");
        unnamed.name = " ".to_string();
        assert!(validate_product(&unnamed).is_err());

        let mut negative = product("arroz-bomba");
        negative.price_cents = Some(-10);
        assert!(validate_product(&negative).is_err());

        let mut missing_price = product("arroz-bomba");
        missing_price.price_cents = None;
        assert!(validate_product(&missing_price).is_ok());
    }
}
