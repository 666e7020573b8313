//! # Observability
//!
//! Structured logging for the whole storefront via the `tracing` crate.
//!
//! Log levels are controlled through `RUST_LOG`:
//!
//! ```bash
//! # Compact operational logs
//! RUST_LOG=info cargo test
//!
//! # Full payloads at client entry points
//! RUST_LOG=debug cargo test
//!
//! # Only the store engine
//! RUST_LOG=resto_storefront::store=debug cargo test
//! ```
//!
//! The format is compact with the module path suppressed — collection logs
//! carry a `record_type` field instead, which keeps lines short while
//! staying filterable.
//!
//! What gets traced:
//! - **Collection lifecycle**: startup, shutdown, and final record counts
//! - **Record operations**: create/get/list/update/delete and actions, with
//!   ids and rejection reasons
//! - **Checkout**: attempt start (amount, reference), payment verdicts,
//!   order writes, and the write-failed-after-capture path
//! - **Degradations**: unparsable prices, rolled-back favorite toggles,
//!   missing configuration

/// Initializes the global tracing subscriber.
///
/// Call once at process start; tests that want logs can call it through a
/// `Once` guard.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
