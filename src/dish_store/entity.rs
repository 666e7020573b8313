//! [`Record`] implementation for the Dish document type.
//!
//! Boundary validation lives here: a create payload with an empty name,
//! price, or image, or a price that does not parse as a non-negative
//! decimal, is rejected before anything is stored.

use async_trait::async_trait;

use super::actions::{DishAction, DishActionResult};
use crate::model::{Dish, DishCreate, DishUpdate};
use crate::store::Record;

#[async_trait]
impl Record for Dish {
    type Id = String;
    type CreateParams = DishCreate;
    type UpdateParams = DishUpdate;
    type Action = DishAction;
    type ActionResult = DishActionResult;

    /// Creates a new Dish from creation parameters.
    ///
    /// New dishes always start with the favorite flag unset.
    fn from_create_params(id: String, params: DishCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("dish name is required".to_string());
        }
        if params.price.trim().is_empty() {
            return Err("dish price is required".to_string());
        }
        match params.price.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => {}
            _ => return Err(format!("dish price is not a valid amount: {}", params.price)),
        }
        if params.image_url.trim().is_empty() {
            return Err("dish image is required".to_string());
        }

        Ok(Self::new(
            id,
            params.name,
            params.price,
            params.in_stock,
            false,
            params.image_url,
        ))
    }

    /// Applies a partial update.
    ///
    /// An absent or empty image URL keeps the stored one — an edit without a
    /// new photo must never wipe the existing reference.
    async fn on_update(&mut self, update: DishUpdate) -> Result<(), String> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(image_url) = update.image_url {
            if !image_url.trim().is_empty() {
                self.image_url = image_url;
            }
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: DishAction) -> Result<DishActionResult, String> {
        match action {
            DishAction::SetFavorite(favorite) => {
                self.favorite = favorite;
                Ok(DishActionResult::SetFavorite(self.favorite))
            }
        }
    }
}
