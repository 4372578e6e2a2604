//! Inventory flags picked up during the night.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Items that can be found. Once held, an item is never lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    SparkPlug,
    Locket,
    Clue,
}

/// Additive-only set of held items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: HashSet<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns `true` if it was not held before.
    pub fn grant(&mut self, item: Item) -> bool {
        self.items.insert(item)
    }

    pub fn has(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    /// Check that every listed item is held.
    pub fn has_all(&self, items: &[Item]) -> bool {
        items.iter().all(|item| self.has(*item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_is_idempotent() {
        let mut inventory = Inventory::new();
        assert!(inventory.grant(Item::Locket));
        assert!(!inventory.grant(Item::Locket));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_has_all() {
        let mut inventory = Inventory::new();
        inventory.grant(Item::SparkPlug);
        inventory.grant(Item::Locket);

        assert!(inventory.has_all(&[Item::SparkPlug, Item::Locket]));
        assert!(!inventory.has_all(&[Item::Locket, Item::Clue]));
        assert!(inventory.has_all(&[]));
    }
}
