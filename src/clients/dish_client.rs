use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::collection_api::CollectionApi;
use crate::dish_store::{DishAction, DishActionResult, DishError};
use crate::model::{Dish, DishCreate, DishUpdate};
use crate::store::{CollectionClient, ListOrder, StoreError};

/// Client for the `dishes` collection.
#[derive(Clone)]
pub struct DishClient {
    inner: CollectionClient<Dish>,
}

impl DishClient {
    pub fn new(inner: CollectionClient<Dish>) -> Self {
        Self { inner }
    }

    /// Writes a new dish and returns it with its assigned id.
    #[instrument(skip(self, dish))]
    pub async fn add_dish(&self, dish: DishCreate) -> Result<Dish, DishError> {
        debug!(name = %dish.name, "add_dish called");
        let payload = dish.clone();
        let id = self
            .inner
            .create(payload)
            .await
            .map_err(Self::map_error)?;
        Ok(Dish::new(
            id,
            dish.name,
            dish.price,
            dish.in_stock,
            false,
            dish.image_url,
        ))
    }

    /// Fetches the whole catalog in write order.
    #[instrument(skip(self))]
    pub async fn list_dishes(&self) -> Result<Vec<Dish>, DishError> {
        debug!("Sending request");
        self.inner
            .list(ListOrder::Insertion)
            .await
            .map_err(Self::map_error)
    }

    /// Applies a partial update and returns the stored record.
    #[instrument(skip(self, update))]
    pub async fn update_dish(&self, id: String, update: DishUpdate) -> Result<Dish, DishError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(Self::map_error)
    }

    /// Persists the favorite flag and returns the stored value.
    #[instrument(skip(self))]
    pub async fn set_favorite(&self, id: String, favorite: bool) -> Result<bool, DishError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(id, DishAction::SetFavorite(favorite))
            .await
            .map_err(Self::map_error)?;
        let DishActionResult::SetFavorite(stored) = result;
        Ok(stored)
    }
}

#[async_trait]
impl CollectionApi<Dish> for DishClient {
    type Error = DishError;

    fn inner(&self) -> &CollectionClient<Dish> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => DishError::NotFound(id),
            StoreError::Rejected(msg) => DishError::Validation(msg),
            other => DishError::Store(other.to_string()),
        }
    }
}
