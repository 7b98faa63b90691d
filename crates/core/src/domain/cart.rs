use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque conversation identifier extracted from the inbound request context.
///
/// Two equal strings are the same conversation; no further uniqueness is
/// enforced beyond what the upstream platform guarantees.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// An in-flight order: food-item name mapped to a positive quantity.
///
/// Item names are case- and form-sensitive; no catalog validation happens
/// here. Invariant: the map never holds an entry with quantity zero —
/// removal that would reach zero deletes the entry instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<String, u32>,
}

/// What happened to a single item during a removal pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Requested quantity met or exceeded the current one; entry deleted.
    Removed,
    /// Quantity decremented in place; carries the remaining amount.
    Decremented(u32),
    /// Item was not in the cart; nothing changed.
    NotPresent,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from (item, quantity) pairs; a duplicate item later in
    /// the sequence overwrites the earlier quantity (last value wins).
    /// Quantities must already be normalized to positive integers.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        let mut cart = Self::new();
        for (item, quantity) in pairs {
            cart.set(item, quantity);
        }
        cart
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity(&self, item: &str) -> Option<u32> {
        self.items.get(item).copied()
    }

    pub fn set(&mut self, item: String, quantity: u32) {
        debug_assert!(quantity > 0, "cart entries must hold positive quantities");
        if quantity > 0 {
            self.items.insert(item, quantity);
        }
    }

    /// Overwrite-merge: every delta entry replaces the existing quantity for
    /// that item rather than adding to it. Items absent from the delta keep
    /// their current quantity.
    pub fn merge_overwrite(&mut self, delta: &Cart) {
        for (item, quantity) in &delta.items {
            self.items.insert(item.clone(), *quantity);
        }
    }

    /// Removes up to `quantity` units of `item`, deleting the entry when the
    /// requested amount meets or exceeds what is in the cart.
    pub fn remove(&mut self, item: &str, quantity: u32) -> RemovalOutcome {
        let Some(current) = self.items.get(item).copied() else {
            return RemovalOutcome::NotPresent;
        };

        if quantity >= current {
            self.items.remove(item);
            RemovalOutcome::Removed
        } else {
            let remaining = current - quantity;
            self.items.insert(item.to_owned(), remaining);
            RemovalOutcome::Decremented(remaining)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(item, quantity)| (item.as_str(), *quantity))
    }

    /// Human-readable listing, deterministic by item name: `"1 fries, 2 burger"`.
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|(item, quantity)| format!("{quantity} {item}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::{Cart, RemovalOutcome};

    fn cart(pairs: &[(&str, u32)]) -> Cart {
        Cart::from_pairs(pairs.iter().map(|(item, quantity)| ((*item).to_owned(), *quantity)))
    }

    #[test]
    fn from_pairs_lets_last_duplicate_win() {
        let cart = cart(&[("taco", 2), ("burger", 1), ("taco", 5)]);
        assert_eq!(cart.quantity("taco"), Some(5));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn merge_overwrites_matching_items_and_keeps_the_rest() {
        let mut existing = cart(&[("apple", 2), ("soda", 1)]);
        existing.merge_overwrite(&cart(&[("apple", 5), ("fries", 3)]));

        assert_eq!(existing.quantity("apple"), Some(5), "merge must replace, not sum");
        assert_eq!(existing.quantity("soda"), Some(1));
        assert_eq!(existing.quantity("fries"), Some(3));
    }

    #[test]
    fn removing_at_least_current_quantity_deletes_the_entry() {
        let mut order = cart(&[("soda", 1)]);
        assert_eq!(order.remove("soda", 3), RemovalOutcome::Removed);
        assert!(order.is_empty());
    }

    #[test]
    fn removing_less_than_current_quantity_decrements() {
        let mut order = cart(&[("soda", 5)]);
        assert_eq!(order.remove("soda", 2), RemovalOutcome::Decremented(3));
        assert_eq!(order.quantity("soda"), Some(3));
    }

    #[test]
    fn removing_an_absent_item_changes_nothing() {
        let mut order = cart(&[("soda", 5)]);
        assert_eq!(order.remove("pizza", 1), RemovalOutcome::NotPresent);
        assert_eq!(order.quantity("soda"), Some(5));
    }

    #[test]
    fn render_is_deterministic_by_item_name() {
        let order = cart(&[("soda", 1), ("burger", 2)]);
        assert_eq!(order.render(), "2 burger, 1 soda");
    }
}
