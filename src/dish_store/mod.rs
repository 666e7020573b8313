//! The `dishes` collection: record implementation, actions, and factory.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::DishClient;
use crate::model::Dish;
use crate::store::Collection;

/// Creates the `dishes` collection and its typed client.
pub fn new() -> (Collection<Dish>, DishClient) {
    let dish_id_counter = Arc::new(AtomicU64::new(1));
    let next_dish_id = move || {
        let id = dish_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("dish_{}", id)
    };

    let (collection, generic_client) = Collection::new(32, next_dish_id);
    let client = DishClient::new(generic_client);

    (collection, client)
}
