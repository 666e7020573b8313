//! # Cart Store
//!
//! The session-scoped cart: the one piece of storefront state that lives
//! entirely in this process.
//!
//! The cart is owned by a single logical thread of control — every mutation
//! is a synchronous call that completes before the next one starts, so there
//! is no interior locking. It is passed explicitly to the views and the
//! checkout flow instead of living in an ambient global.
//!
//! Money rule: the displayed total gates the payment amount, so [`CartStore::total`]
//! favors availability over exactness — a malformed price contributes zero
//! and is logged rather than failing the computation.

use crate::model::{parse_price, Dish};

/// A copy of a dish's display fields captured at add-time.
///
/// The cart holds at most one item per dish id.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub dish_id: String,
    pub name: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Dish> for CartItem {
    fn from(dish: &Dish) -> Self {
        Self {
            dish_id: dish.id.clone(),
            name: dish.name.clone(),
            price: dish.price.clone(),
            image_url: dish.image_url.clone(),
        }
    }
}

/// What happened on an [`CartStore::add`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The dish was already present; the cart is unchanged. Callers may
    /// surface a notice.
    AlreadyInCart,
}

/// The session cart.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dish unless an item with the same id is already present.
    ///
    /// Duplicate adds are silently ignored — the cart never holds two items
    /// for one dish.
    pub fn add(&mut self, dish: &Dish) -> AddOutcome {
        if self.contains(&dish.id) {
            return AddOutcome::AlreadyInCart;
        }
        self.items.push(CartItem::from(dish));
        AddOutcome::Added
    }

    /// Removes the item with the given dish id. Absent ids are a no-op.
    pub fn remove(&mut self, dish_id: &str) {
        self.items.retain(|item| item.dish_id != dish_id);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of the item prices, with unparsable prices contributing zero.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| parse_price(&item.price)).sum()
    }

    pub fn contains(&self, dish_id: &str) -> bool {
        self.items.iter().any(|item| item.dish_id == dish_id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, price: &str) -> Dish {
        Dish::new(
            id,
            format!("{} plate", id),
            price,
            true,
            false,
            format!("https://cdn.example/{}.jpg", id),
        )
    }

    #[test]
    fn add_is_idempotent_per_dish() {
        let mut cart = CartStore::new();
        let d = dish("dish_1", "10.00");

        assert_eq!(cart.add(&d), AddOutcome::Added);
        assert_eq!(cart.add(&d), AddOutcome::AlreadyInCart);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_absent_id_changes_nothing() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));
        cart.add(&dish("dish_2", "5.50"));

        cart.remove("dish_404");
        assert_eq!(cart.len(), 2);

        cart.remove("dish_1");
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains("dish_1"));
        assert!(cart.contains("dish_2"));
    }

    #[test]
    fn total_tracks_present_items() {
        let mut cart = CartStore::new();
        assert_eq!(cart.total(), 0.0);

        cart.add(&dish("dish_1", "10.00"));
        cart.add(&dish("dish_2", "5.50"));
        assert_eq!(cart.total(), 15.5);

        cart.remove("dish_1");
        assert_eq!(cart.total(), 5.5);
    }

    #[test]
    fn malformed_price_contributes_zero() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));
        cart.add(&dish("dish_2", "ask the chef"));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 10.0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));
        cart.add(&dish("dish_2", "5.50"));

        cart.clear();
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total(), 0.0);
        assert!(cart.is_empty());
    }
}
