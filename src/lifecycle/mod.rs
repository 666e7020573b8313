//! Runtime wiring: collection startup/shutdown and tracing setup.

pub mod storefront;
pub mod tracing;

pub use self::storefront::Storefront;
pub use self::tracing::setup_tracing;
