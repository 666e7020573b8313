//! # Admin Management
//!
//! The owner's surface: dish CRUD with bounded image uploads, the persisted
//! favorite toggle, and the read-only order listing.
//!
//! The panel keeps a local copy of the dish list and patches it in place as
//! operations confirm. The favorite toggle is applied optimistically and
//! rolled back if the store refuses the write — local state is never left
//! diverged from storage.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::clients::{CollectionApi, DishClient, OrderClient};
use crate::dish_store::DishError;
use crate::model::{Dish, DishCreate, DishUpdate, Order};
use crate::order_store::OrderError;
use crate::services::images::{
    bounded_upload, ImageCompressor, ImageError, ImageHost, ImageLimits,
};

/// Errors surfaced by the admin panel.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    /// A required form field was empty; nothing was attempted.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Dish not found: {0}")]
    UnknownDish(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Dish(#[from] DishError),

    #[error(transparent)]
    Orders(#[from] OrderError),
}

/// Form for creating a dish: every field is required.
#[derive(Debug, Clone)]
pub struct NewDishForm {
    pub name: String,
    pub price: String,
    pub in_stock: bool,
    pub image: Vec<u8>,
}

/// Form for editing a dish. `new_image: None` keeps the stored photo.
#[derive(Debug, Clone)]
pub struct EditDishForm {
    pub name: String,
    pub price: String,
    pub in_stock: bool,
    pub new_image: Option<Vec<u8>>,
}

/// The answer to the "are you sure?" prompt a delete requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

/// The admin panel over the hosted collections and the image host.
pub struct AdminPanel {
    dishes: DishClient,
    orders: OrderClient,
    image_host: Arc<dyn ImageHost>,
    compressor: Arc<dyn ImageCompressor>,
    limits: ImageLimits,
    preset: String,
    local: Vec<Dish>,
}

impl AdminPanel {
    pub fn new(
        dishes: DishClient,
        orders: OrderClient,
        image_host: Arc<dyn ImageHost>,
        compressor: Arc<dyn ImageCompressor>,
        limits: ImageLimits,
        preset: impl Into<String>,
    ) -> Self {
        Self {
            dishes,
            orders,
            image_host,
            compressor,
            limits,
            preset: preset.into(),
            local: Vec::new(),
        }
    }

    /// Reloads the local dish list from storage.
    pub async fn refresh(&mut self) -> Result<(), AdminError> {
        self.local = self.dishes.list_dishes().await?;
        info!(count = self.local.len(), "Admin dish list loaded");
        Ok(())
    }

    /// The panel's current copy of the dish list.
    pub fn dishes(&self) -> &[Dish] {
        &self.local
    }

    /// Creates a dish: bound and upload the image, write the record, and
    /// append it to the local list.
    pub async fn add_dish(&mut self, form: NewDishForm) -> Result<Dish, AdminError> {
        if form.name.trim().is_empty() {
            return Err(AdminError::MissingField("name"));
        }
        if form.price.trim().is_empty() {
            return Err(AdminError::MissingField("price"));
        }
        if form.image.is_empty() {
            return Err(AdminError::MissingField("image"));
        }

        let image_url = bounded_upload(
            self.image_host.as_ref(),
            self.compressor.as_ref(),
            &self.limits,
            form.image,
            &self.preset,
        )
        .await?;

        let dish = self
            .dishes
            .add_dish(DishCreate {
                name: form.name,
                price: form.price,
                in_stock: form.in_stock,
                image_url,
            })
            .await?;

        self.local.push(dish.clone());
        info!(dish_id = %dish.id, "Dish added");
        Ok(dish)
    }

    /// Edits a dish. Without a new image the stored URL is kept; the local
    /// list is patched in place with the record the store returns.
    pub async fn update_dish(&mut self, id: &str, form: EditDishForm) -> Result<Dish, AdminError> {
        let image_url = match form.new_image {
            Some(image) => Some(
                bounded_upload(
                    self.image_host.as_ref(),
                    self.compressor.as_ref(),
                    &self.limits,
                    image,
                    &self.preset,
                )
                .await?,
            ),
            None => None,
        };

        let updated = self
            .dishes
            .update_dish(
                id.to_string(),
                DishUpdate {
                    name: Some(form.name),
                    price: Some(form.price),
                    in_stock: Some(form.in_stock),
                    image_url,
                },
            )
            .await?;

        if let Some(slot) = self.local.iter_mut().find(|d| d.id == id) {
            *slot = updated.clone();
        }
        info!(dish_id = %id, "Dish updated");
        Ok(updated)
    }

    /// Deletes a dish after explicit confirmation; declining is a no-op.
    ///
    /// A dish already gone from storage still counts as deleted.
    pub async fn delete_dish(
        &mut self,
        id: &str,
        confirmation: DeleteConfirmation,
    ) -> Result<bool, AdminError> {
        if confirmation == DeleteConfirmation::Declined {
            return Ok(false);
        }

        self.dishes.delete(id.to_string()).await?;
        self.local.retain(|d| d.id != id);
        info!(dish_id = %id, "Dish deleted");
        Ok(true)
    }

    /// Toggles a dish's favorite flag: optimistic local flip, persisted
    /// immediately, rolled back if the write fails.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<bool, AdminError> {
        let dish = self
            .local
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AdminError::UnknownDish(id.to_string()))?;

        let previous = dish.favorite;
        let target = !previous;
        dish.favorite = target;

        match self.dishes.set_favorite(id.to_string(), target).await {
            Ok(stored) => {
                if let Some(dish) = self.local.iter_mut().find(|d| d.id == id) {
                    dish.favorite = stored;
                }
                Ok(stored)
            }
            Err(e) => {
                if let Some(dish) = self.local.iter_mut().find(|d| d.id == id) {
                    dish.favorite = previous;
                }
                warn!(dish_id = %id, error = %e, "Favorite toggle rolled back");
                Err(e.into())
            }
        }
    }

    /// All submitted orders, most recent first.
    pub async fn recent_orders(&self) -> Result<Vec<Order>, AdminError> {
        Ok(self.orders.recent_orders().await?)
    }
}

