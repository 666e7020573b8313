use tracing::{error, info};

use crate::clients::{DishClient, OrderClient};
use crate::config::StorefrontConfig;
use crate::services::auth::AccessPolicy;

/// The runtime wiring for the storefront's storage stand-in.
///
/// `Storefront` is responsible for:
/// - **Lifecycle**: spawning the `dishes` and `orders` collection tasks and
///   shutting them down cleanly
/// - **Access**: holding the configured [`AccessPolicy`]
/// - **Handles**: exposing the typed clients the views are built on
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::new(StorefrontConfig::load());
///
/// let catalog = CatalogView::load(&storefront.dish_client).await?;
/// // ... browse, fill a cart, check out ...
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    /// Client for the `dishes` collection.
    pub dish_client: DishClient,

    /// Client for the `orders` collection.
    pub order_client: OrderClient,

    /// Role resolution for signed-in identities.
    pub access: AccessPolicy,

    /// The configuration the storefront was built with.
    pub config: StorefrontConfig,

    /// Task handles for the collection actors, kept for shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Spawns both collections and wires up their clients.
    pub fn new(config: StorefrontConfig) -> Self {
        let (dish_collection, dish_client) = crate::dish_store::new();
        let (order_collection, order_client) = crate::order_store::new();

        let dish_handle = tokio::spawn(dish_collection.run());
        let order_handle = tokio::spawn(order_collection.run());

        let access = AccessPolicy::new(config.admin_emails.clone());
        info!("Storefront collections started");

        Self {
            dish_client,
            order_client,
            access,
            config,
            handles: vec![dish_handle, order_handle],
        }
    }

    /// Gracefully shuts the collections down.
    ///
    /// Dropping the clients closes their channels; each collection drains
    /// its queue and exits. Returns an error if a collection task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.dish_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(format!("Collection task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete");
        Ok(())
    }
}
