//! Cart state and its transitions.

use serde::{Deserialize, Serialize};
use tote_core::ProductId;
use tracing::{debug, warn};

use super::types::{CartAction, CartLineItem, ItemRef};

/// The shopping cart: an ordered list of line items, unique by product id.
///
/// Every line has a quantity of at least 1. The only way to change a
/// `CartState` is through the operations below, each of which keeps both
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CartSnapshot")]
pub struct CartState {
    items: Vec<CartLineItem>,
}

/// The stored form of a cart, before normalization.
#[derive(Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<CartLineItem>,
}

impl From<CartSnapshot> for CartState {
    fn from(snapshot: CartSnapshot) -> Self {
        Self::from_items(snapshot.items)
    }
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary lines.
    ///
    /// Lines with quantity 0 are dropped and lines sharing a product id are
    /// merged into the first one, summing quantities.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut state = Self::new();
        for line in items {
            if line.quantity == 0 {
                warn!(product_id = %line.id, "Dropping cart line with zero quantity");
                continue;
            }
            match state.position(line.id) {
                Some(idx) => {
                    warn!(product_id = %line.id, "Merging duplicate cart line");
                    if let Some(existing) = state.items.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => state.items.push(line),
            }
        }
        state
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.is_for(id))
    }

    /// Quantity held for `id`, or 0.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |line| line.quantity)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|line| line.is_for(id))
    }

    /// Merge `quantity` units of `item` into the cart.
    ///
    /// An existing line for the same product has its quantity increased;
    /// otherwise a new line is appended. Adding zero units changes nothing.
    pub fn add(&mut self, item: ItemRef, quantity: u32) {
        let id = item.product_id();
        if quantity == 0 {
            debug!(product_id = %id, "Ignoring add of zero units");
            return;
        }

        match self.position(id) {
            Some(idx) => {
                if let Some(line) = self.items.get_mut(idx) {
                    line.quantity = line.quantity.saturating_add(quantity);
                    debug!(product_id = %id, quantity = line.quantity, "Merged into cart line");
                }
            }
            None => {
                self.items.push(item.into_line(quantity));
                debug!(product_id = %id, quantity, "Added cart line");
            }
        }
    }

    /// Remove the line for `id`. Does nothing if there is none.
    pub fn remove(&mut self, id: ProductId) {
        if let Some(idx) = self.position(id) {
            self.items.remove(idx);
            debug!(product_id = %id, "Removed cart line");
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// Negative targets count as zero, and zero removes the line. Does
    /// nothing if there is no line for `id`.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        let Some(idx) = self.position(id) else {
            return;
        };

        let target = quantity.max(0);
        if target == 0 {
            self.items.remove(idx);
            debug!(product_id = %id, "Removed cart line at zero quantity");
            return;
        }

        if let Some(line) = self.items.get_mut(idx) {
            line.quantity = u32::try_from(target).unwrap_or(u32::MAX);
            debug!(product_id = %id, quantity = line.quantity, "Set cart line quantity");
        }
    }

    /// Raise the quantity of the line for `id` by one.
    pub fn increment(&mut self, id: ProductId) {
        if let Some(line) = self.get(id) {
            let next = i64::from(line.quantity) + 1;
            self.update_quantity(id, next);
        }
    }

    /// Lower the quantity of the line for `id` by one, removing it when it
    /// reaches zero.
    pub fn decrement(&mut self, id: ProductId) {
        if let Some(line) = self.get(id) {
            let next = i64::from(line.quantity) - 1;
            self.update_quantity(id, next);
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
    }

    /// Apply a [`CartAction`].
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { item, quantity } => self.add(item, quantity),
            CartAction::Remove(id) => self.remove(id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(id, quantity),
            CartAction::Increment(id) => self.increment(id),
            CartAction::Decrement(id) => self.decrement(id),
            CartAction::Clear => self.clear(),
        }
    }
}

/// Pure form of [`CartState::apply`]: consume a state, return the next one.
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    state.apply(action);
    state
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tote_core::Price;

    use super::*;
    use crate::catalog::Product;

    fn id(n: u64) -> ProductId {
        ProductId::new(n)
    }

    fn priced(n: u64, cents: i64) -> ItemRef {
        ItemRef::id(id(n)).with_price(Price::from_cents(cents).unwrap())
    }

    fn quantities(state: &CartState) -> Vec<(u64, u32)> {
        state
            .items()
            .iter()
            .map(|line| (line.id.as_u64(), line.quantity))
            .collect()
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut cart = CartState::new();
        cart.add(priced(1, 999), 1);
        cart.add(priced(2, 500), 3);
        assert_eq!(quantities(&cart), vec![(1, 1), (2, 3)]);
    }

    #[test]
    fn test_add_merges_by_id() {
        let mut cart = CartState::new();
        cart.add(priced(1, 999), 2);
        cart.add(ItemRef::id(id(1)), 5);
        assert_eq!(quantities(&cart), vec![(1, 7)]);
        // display fields come from the first add
        assert_eq!(cart.items()[0].price, Some(Price::from_cents(999).unwrap()));
    }

    #[test]
    fn test_add_merges_flat_and_product_refs() {
        let product = Product::new(id(4), "Chair", Some(Price::from_cents(4000).unwrap()));
        let mut cart = CartState::new();
        cart.add(ItemRef::product(product), 1);
        cart.add(ItemRef::id(id(4)), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(id(4)), 2);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 0);
        assert!(cart.is_empty());

        cart.add(priced(1, 100), 2);
        cart.add(priced(1, 100), 0);
        assert_eq!(quantities(&cart), vec![(1, 2)]);
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), u32::MAX);
        cart.add(priced(1, 100), 10);
        assert_eq!(cart.quantity_of(id(1)), u32::MAX);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 1);
        cart.add(priced(2, 100), 4);
        let before = cart.clone();

        cart.remove(id(9));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut cart = CartState::new();
        for n in 1..=3 {
            cart.add(priced(n, 100), 1);
        }
        cart.remove(id(2));
        assert_eq!(quantities(&cart), vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 5);
        cart.update_quantity(id(1), 2);
        assert_eq!(cart.quantity_of(id(1)), 2);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 5);
        cart.add(priced(2, 100), 5);
        cart.update_quantity(id(1), 0);
        cart.update_quantity(id(2), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = CartState::new();
        cart.update_quantity(id(1), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_saturates() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 1);
        cart.update_quantity(id(1), i64::MAX);
        assert_eq!(cart.quantity_of(id(1)), u32::MAX);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 1);
        cart.increment(id(1));
        cart.increment(id(1));
        assert_eq!(cart.quantity_of(id(1)), 3);

        cart.decrement(id(1));
        cart.decrement(id(1));
        assert_eq!(cart.quantity_of(id(1)), 1);

        cart.decrement(id(1));
        assert!(cart.is_empty());

        cart.increment(id(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        cart.add(priced(1, 100), 1);
        cart.add(priced(2, 100), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_reduce_matches_apply() {
        let state = reduce(CartState::new(), CartAction::add_many(priced(1, 100), 2));
        let state = reduce(state, CartAction::Increment(id(1)));
        let state = reduce(state, CartAction::add(priced(2, 100)));
        let state = reduce(state, CartAction::Remove(id(2)));
        assert_eq!(quantities(&state), vec![(1, 3)]);

        let state = reduce(
            state,
            CartAction::UpdateQuantity {
                id: id(1),
                quantity: 0,
            },
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_from_items_normalizes() {
        let lines = vec![
            priced(1, 100).into_line(2),
            priced(2, 100).into_line(0),
            priced(1, 100).into_line(3),
        ];
        let cart = CartState::from_items(lines);
        assert_eq!(quantities(&cart), vec![(1, 5)]);
    }
}
