//! Error types for the `dishes` collection.

use thiserror::Error;

/// Errors that can occur during dish operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DishError {
    /// The requested dish was not found.
    #[error("Dish not found: {0}")]
    NotFound(String),

    /// The dish payload was rejected at the storage boundary.
    #[error("Dish validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the store.
    #[error("Dish store error: {0}")]
    Store(String),
}

impl From<String> for DishError {
    fn from(msg: String) -> Self {
        DishError::Store(msg)
    }
}
