//! Trait seams for the hosted collaborators: payment popup, auth service,
//! and image CDN. Each seam is an `async_trait` the storefront awaits; the
//! hosted side stays a black box.

pub mod auth;
pub mod images;
pub mod payment;

pub use auth::*;
pub use images::*;
pub use payment::*;
