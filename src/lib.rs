//! # Resto Storefront
//!
//! > **A restaurant ordering storefront over hosted services.**
//!
//! Shoppers browse dishes, fill a session cart, and check out through a
//! hosted payment popup; the owner manages dishes and reads submitted
//! orders. Persistence, authentication, image hosting, and payment capture
//! are all delegated to hosted collaborators reached through thin typed
//! seams — the piece with real invariants is the cart and checkout
//! consistency model, and that is where this crate spends its care.
//!
//! ## Consistency Rules
//!
//! - A cart holds **at most one item per dish**; duplicate adds are no-ops.
//! - Within one checkout attempt, **payment resolution strictly precedes
//!   the order write** — an order is never recorded before the gateway
//!   reports success.
//! - The cart is cleared **only on a confirmed order write**. Payment
//!   captured + write failed leaves the cart intact and surfaces a distinct
//!   contact-support outcome, because a silent retry would double-charge.
//! - The payment reference is minted **once per attempt** and reused on
//!   retries within it.
//! - Amounts cross to the gateway in integer minor units, converted by
//!   **rounding**, never truncation.
//!
//! ## Concurrency Model
//!
//! The storefront itself is single-threaded and event-driven: cart and
//! checkout mutations are synchronous and never interleave. The storage
//! stand-in follows the actor model — each collection runs in its own Tokio
//! task, processes requests sequentially, and needs no locks. Suspension
//! points are exactly the awaits on the hosted seams.
//!
//! ## Module Tour
//!
//! ### 1. The Core ([`cart`], [`checkout`])
//! The session cart and the state machine over one order attempt.
//!
//! ### 2. The Storage Stand-in ([`store`], [`dish_store`], [`order_store`])
//! A generic actor-backed document collection plus the two record
//! implementations, with validation at the storage boundary.
//!
//! ### 3. The Interface ([`clients`], [`catalog`], [`admin`])
//! Typed collection clients and the two surfaces built on them: the
//! shopper's catalog view and the owner's admin panel.
//!
//! ### 4. The Hosted Seams ([`services`])
//! `async_trait` seams for the payment popup, the auth service, and the
//! image CDN, plus scripted doubles for tests.
//!
//! ### 5. The Wiring ([`lifecycle`], [`config`])
//! Collection startup/shutdown, tracing setup, and environment-driven
//! configuration.
//!
//! ## Running Tests
//!
//! ```bash
//! RUST_LOG=info cargo test
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod dish_store;
pub mod lifecycle;
pub mod model;
pub mod order_store;
pub mod services;
pub mod store;
