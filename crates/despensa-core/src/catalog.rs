//! # Product Catalog
//!
//! The static, read-only product list shown on the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Flow                                         │
//! │                                                                         │
//! │  Catalog::builtin() ──► validated once (unique ids, sane prices)        │
//! │         │                                                               │
//! │         ├──► front end lists / filters / searches products             │
//! │         │                                                               │
//! │         └──► catalog.require(id) ──► Cart::add_item(&product, qty)     │
//! │                                                                         │
//! │  The catalog is never owned or mutated by a store.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeSet, HashSet};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Product;
use crate::validation::validate_product;

/// A validated, read-only list of products.
///
/// ## Invariants
/// - Product ids are unique
/// - Every product passes `validate_product`
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and invalid products.
    ///
    /// ## Example
    /// ```rust
    /// use despensa_core::Catalog;
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// assert!(catalog.get("aceite-oliva-virgen-5l").is_some());
    /// ```
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product(product)?;

            if !seen.insert(product.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }
                .into());
            }
        }

        Ok(Catalog { products })
    }

    /// The catalog shipped with the storefront.
    pub fn builtin() -> CoreResult<Self> {
        Catalog::new(builtin_products())
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Products tagged with `category` (case-insensitive).
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Distinct category tags, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Products highlighted on the landing page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Products that can currently be ordered.
    pub fn in_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.in_stock)
    }

    /// Case-insensitive substring search over name, description and category.
    ///
    /// An empty query matches every product.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

// =============================================================================
// Built-in Catalog Data
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    price_cents: i64,
    unit: &str,
    description: &str,
    in_stock: bool,
    featured: bool,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price_cents: Some(price_cents),
        original_price_cents: None,
        discount_percentage: None,
        unit: unit.to_string(),
        description: description.to_string(),
        image: format!("/images/products/{}.jpg", id),
        in_stock,
        featured,
    }
}

fn discounted(mut product: Product, original_price_cents: i64, pct: u8) -> Product {
    product.original_price_cents = Some(original_price_cents);
    product.discount_percentage = Some(pct);
    product
}

fn builtin_products() -> Vec<Product> {
    vec![
        discounted(
            item(
                "aceite-oliva-virgen-5l",
                "Aceite de oliva virgen extra",
                "aceites",
                2499,
                "garrafa 5 L",
                "Aceite de oliva virgen extra de primera prensada en frío.",
                true,
                true,
            ),
            2899,
            14,
        ),
        item(
            "jamon-serrano-loncheado",
            "Jamón serrano loncheado",
            "embutidos",
            3250,
            "caja 10 sobres",
            "Jamón serrano gran reserva loncheado a cuchillo, sobres de 100 g.",
            true,
            true,
        ),
        item(
            "queso-manchego-curado",
            "Queso manchego curado",
            "lacteos",
            4175,
            "pieza 3 kg",
            "Queso de oveja manchega con doce meses de curación.",
            true,
            false,
        ),
        item(
            "arroz-bomba",
            "Arroz bomba",
            "despensa",
            1250,
            "saco 5 kg",
            "Arroz de grano redondo ideal para paellas y arroces melosos.",
            true,
            false,
        ),
        discounted(
            item(
                "atun-claro-aceite",
                "Atún claro en aceite de oliva",
                "conservas",
                1890,
                "pack 6 latas",
                "Lomos de atún claro en aceite de oliva, latas de 900 g.",
                true,
                true,
            ),
            2100,
            10,
        ),
        item(
            "pimenton-de-la-vera",
            "Pimentón de la Vera",
            "especias",
            675,
            "bote 750 g",
            "Pimentón ahumado dulce con denominación de origen.",
            false,
            false,
        ),
        item(
            "harina-trigo-panadera",
            "Harina de trigo panadera",
            "despensa",
            1420,
            "saco 25 kg",
            "Harina de fuerza media para panadería y repostería.",
            true,
            false,
        ),
        item(
            "vinagre-jerez",
            "Vinagre de Jerez reserva",
            "aceites",
            890,
            "botella 1 L",
            "Vinagre de vino envejecido en botas de roble.",
            true,
            false,
        ),
        item(
            "chorizo-iberico",
            "Chorizo ibérico de bellota",
            "embutidos",
            2780,
            "pieza 1 kg",
            "Chorizo curado de cerdo ibérico alimentado con bellota.",
            false,
            true,
        ),
        item(
            "pimientos-piquillo",
            "Pimientos del piquillo",
            "conservas",
            1160,
            "pack 12 botes",
            "Pimientos asados a la leña y pelados a mano.",
            true,
            false,
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 10);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = builtin_products();
        products.push(products[0].clone());

        let err = Catalog::new(products).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_product_rejected() {
        let mut products = builtin_products();
        products[3].id = String::new();
        assert!(Catalog::new(products).is_err());
    }

    #[test]
    fn test_require_unknown_product() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.require("caviar").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "caviar"));
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.categories(),
            vec!["aceites", "conservas", "despensa", "embutidos", "especias", "lacteos"]
        );
    }

    #[test]
    fn test_filters() {
        let catalog = Catalog::builtin().unwrap();

        let embutidos: Vec<_> = catalog.by_category("EMBUTIDOS").map(|p| p.id.as_str()).collect();
        assert_eq!(embutidos, vec!["jamon-serrano-loncheado", "chorizo-iberico"]);

        assert_eq!(catalog.featured().count(), 4);
        assert!(catalog.in_stock().all(|p| p.in_stock));
        assert_eq!(catalog.in_stock().count(), 8);
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::builtin().unwrap();

        let hits: Vec<_> = catalog.search("ACEITE").into_iter().map(|p| p.id.as_str()).collect();
        assert!(hits.contains(&"aceite-oliva-virgen-5l"));
        assert!(hits.contains(&"atun-claro-aceite"));
        assert!(hits.contains(&"vinagre-jerez")); // category "aceites"

        assert_eq!(catalog.search("  ").len(), catalog.len());
        assert!(catalog.search("caviar").is_empty());
    }
}
