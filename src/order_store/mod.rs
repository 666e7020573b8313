//! The `orders` collection: record implementation and factory.

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::OrderClient;
use crate::model::Order;
use crate::store::Collection;

/// Creates the `orders` collection and its typed client.
pub fn new() -> (Collection<Order>, OrderClient) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("order_{}", id)
    };

    let (collection, generic_client) = Collection::new(32, next_order_id);
    let client = OrderClient::new(generic_client);

    (collection, client)
}
