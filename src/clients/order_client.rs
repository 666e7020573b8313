use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::clients::collection_api::CollectionApi;
use crate::model::{Order, OrderCreate};
use crate::order_store::OrderError;
use crate::store::{CollectionClient, ListOrder, StoreError};

/// Client for the `orders` collection.
///
/// The storefront only ever writes orders and reads them back for the admin
/// listing; there is no update surface.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    /// Writes a new order record and returns its assigned id.
    #[instrument(skip(self, order))]
    pub async fn place_order(&self, order: OrderCreate) -> Result<String, OrderError> {
        debug!(?order, "place_order called");
        info!("Sending place_order to store");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    /// All orders, most recent first.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .list(ListOrder::NewestFirst)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl CollectionApi<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            StoreError::Rejected(msg) => OrderError::Validation(msg),
            other => OrderError::Store(other.to_string()),
        }
    }
}
