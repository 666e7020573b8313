//! # Dish Catalog View
//!
//! The storefront's read-only projection of the `dishes` collection:
//! fetched once on load, browsed, and fed into the cart.
//!
//! The favorite toggle here is local-only by design — it is a view
//! preference on the shopper's copy of the list and never writes back. The
//! admin panel owns the persisted favorite flag (with rollback on failure);
//! see DESIGN.md for the split.

use thiserror::Error;
use tracing::info;

use crate::cart::{AddOutcome, CartStore};
use crate::clients::DishClient;
use crate::dish_store::DishError;
use crate::model::Dish;

/// Errors surfaced while browsing the catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Dish not found: {0}")]
    UnknownDish(String),

    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error(transparent)]
    Load(#[from] DishError),
}

/// A one-shot snapshot of the dish list.
///
/// Not live: a reload means building a new view.
pub struct CatalogView {
    dishes: Vec<Dish>,
}

impl CatalogView {
    /// Fetches the full dish collection.
    pub async fn load(client: &DishClient) -> Result<Self, CatalogError> {
        let dishes = client.list_dishes().await?;
        info!(count = dishes.len(), "Catalog loaded");
        Ok(Self { dishes })
    }

    /// Builds a view over an already-fetched list.
    pub fn from_dishes(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn dish(&self, dish_id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == dish_id)
    }

    /// Flips the favorite marker on the local copy only.
    ///
    /// Returns the new value, or `None` for an unknown id.
    pub fn toggle_favorite(&mut self, dish_id: &str) -> Option<bool> {
        let dish = self.dishes.iter_mut().find(|d| d.id == dish_id)?;
        dish.favorite = !dish.favorite;
        Some(dish.favorite)
    }

    /// Puts a dish in the cart.
    ///
    /// Refuses out-of-stock dishes; a dish already in the cart comes back as
    /// [`AddOutcome::AlreadyInCart`] so the caller can tell the shopper.
    pub fn add_to_cart(
        &self,
        cart: &mut CartStore,
        dish_id: &str,
    ) -> Result<AddOutcome, CatalogError> {
        let dish = self
            .dish(dish_id)
            .ok_or_else(|| CatalogError::UnknownDish(dish_id.to_string()))?;
        if !dish.in_stock {
            return Err(CatalogError::OutOfStock(dish.name.clone()));
        }
        Ok(cart.add(dish))
    }
}
