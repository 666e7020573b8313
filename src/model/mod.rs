//! Wire-shaped records for the hosted collections plus the checkout data
//! they carry, implementing the [`Record`](crate::store::Record) trait where
//! they are stored.

pub mod dish;
pub mod order;

pub use dish::*;
pub use order::*;
