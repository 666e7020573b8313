//! Actor-backed document collections standing in for the hosted storage
//! service.
//!
//! # Main Components
//!
//! - [`Record`] - Trait a document type implements to live in a collection
//! - [`Collection`] - Actor owning one collection's records
//! - [`CollectionClient`] - Message-passing handle used by the typed clients
//! - [`StoreError`] - Transport and boundary-validation errors
//!
//! # Testing
//!
//! See [`mock`] for scripting storage responses without a live collection.

pub mod core;
pub mod mock;

pub use self::core::*;
