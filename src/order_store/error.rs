//! Error types for the `orders` collection.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order payload was rejected at the storage boundary.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the store.
    #[error("Order store error: {0}")]
    Store(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::Store(msg)
    }
}
