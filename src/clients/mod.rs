//! Type-safe wrappers around [`CollectionClient`](crate::store::CollectionClient).

pub mod collection_api;
pub mod dish_client;
pub mod order_client;

pub use collection_api::*;
pub use dish_client::*;
pub use order_client::*;
