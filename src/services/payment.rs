//! Hosted payment popup seam.
//!
//! The provider's inline widget collects card or mobile-money details and
//! reports back. The storefront only sees the typed request it hands over
//! and the typed outcome it gets back — no callback nesting.

use async_trait::async_trait;
use uuid::Uuid;

/// What the storefront hands to the hosted payment UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount in integer minor units (pesewas, cents, ...).
    pub amount_minor: u64,
    /// ISO currency code, e.g. `"GHS"`.
    pub currency: String,
    /// Payer email forwarded to the provider.
    pub email: String,
    /// Unique reference correlating this attempt with the provider.
    pub reference: String,
}

/// How the hosted payment UI resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment captured; carries the provider's reference.
    Succeeded { reference: String },
    /// The payer closed the popup without paying.
    Cancelled,
    /// The provider reported a failure.
    Failed { reason: String },
}

/// The hosted payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Drives the hosted UI to completion for one request.
    async fn collect(&self, request: PaymentRequest) -> PaymentOutcome;
}

/// Mints a collision-free payment reference.
///
/// The reference identifies one checkout attempt to the provider; it is
/// minted once per attempt and reused on retries within that attempt.
pub fn mint_reference() -> String {
    Uuid::new_v4().simple().to_string()
}

pub mod mock {
    //! Scripted gateway for tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A [`PaymentGateway`] that answers from a queue of scripted outcomes
    /// and records every request it saw.
    #[derive(Default)]
    pub struct ScriptedGateway {
        outcomes: Mutex<VecDeque<PaymentOutcome>>,
        requests: Mutex<Vec<PaymentRequest>>,
    }

    impl ScriptedGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues the outcome for the next `collect` call.
        pub fn push(&self, outcome: PaymentOutcome) {
            self.outcomes
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push_back(outcome);
        }

        /// Every request handed to the gateway so far.
        pub fn requests(&self) -> Vec<PaymentRequest> {
            self.requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for ScriptedGateway {
        async fn collect(&self, request: PaymentRequest) -> PaymentOutcome {
            self.requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(request);
            self.outcomes
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .pop_front()
                .expect("no scripted payment outcome queued")
        }
    }
}
