//! # Favorites
//!
//! The set of product ids a visitor has starred.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Favorited product ids.
///
/// Backed by a `BTreeSet` so snapshots serialize in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorites {
    #[serde(default)]
    favorites: BTreeSet<String>,
}

impl Favorites {
    /// Creates an empty favorites set.
    pub fn new() -> Self {
        Favorites::default()
    }

    /// Adds `id` if absent, removes it otherwise.
    ///
    /// ## Returns
    /// Whether `id` is a favorite after the call.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.to_string());
            true
        }
    }

    /// Adds `id`. Returns `false` if it was already present.
    pub fn add(&mut self, id: &str) -> bool {
        self.favorites.insert(id.to_string())
    }

    /// Removes `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.favorites.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.favorites.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.favorites.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut favorites = Favorites::new();
        favorites.add("arroz-bomba");
        let original = favorites.clone();

        assert!(favorites.toggle("vinagre-jerez"));
        assert!(!favorites.toggle("vinagre-jerez"));
        assert_eq!(favorites, original);

        assert!(!favorites.toggle("arroz-bomba"));
        assert!(favorites.toggle("arroz-bomba"));
        assert_eq!(favorites, original);
    }

    #[test]
    fn test_add_and_remove_are_idempotent() {
        let mut favorites = Favorites::new();

        assert!(favorites.add("a"));
        assert!(!favorites.add("a"));
        assert_eq!(favorites.len(), 1);

        assert!(favorites.remove("a"));
        assert!(!favorites.remove("a"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_membership_and_order() {
        let mut favorites = Favorites::new();
        favorites.add("queso");
        favorites.add("aceite");

        assert!(favorites.contains("queso"));
        assert!(!favorites.contains("jamon"));
        assert_eq!(favorites.ids().collect::<Vec<_>>(), vec!["aceite", "queso"]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut favorites = Favorites::new();
        favorites.add("b");
        favorites.add("a");

        let json = serde_json::to_string(&favorites).unwrap();
        assert_eq!(json, r#"{"favorites":["a","b"]}"#);

        let restored: Favorites = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, favorites);
    }
}
