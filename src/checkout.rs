//! # Checkout Flow
//!
//! The state machine over one order attempt: review the cart, collect
//! contact details, drive the hosted payment popup, and persist the order.
//!
//! Two rules anchor the design:
//!
//! - Payment resolution strictly precedes the order write. An order is never
//!   recorded before the gateway reports success.
//! - The cart is cleared only on a confirmed write. If payment succeeds and
//!   the write fails, the cart stays intact and the caller gets a distinct
//!   contact-support outcome — a silent retry would double-charge, because
//!   the provider already captured the money.
//!
//! The machine also enforces the no-duplicate-submission rule: each
//! transition is accepted from exactly one stage, and re-requesting payment
//! within an attempt returns the already-minted request instead of minting a
//! second reference.

use thiserror::Error;
use tracing::{info, warn};

use crate::cart::CartStore;
use crate::clients::OrderClient;
use crate::model::{CustomerDetails, LineItem, OrderCreate};
use crate::services::payment::{mint_reference, PaymentGateway, PaymentOutcome, PaymentRequest};

/// Stages of one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    ReviewingCart,
    EnteringDetails,
    AwaitingPayment,
    PaymentSucceeded,
    PaymentCancelled,
    OrderPersisted,
    OrderPersistFailed,
}

/// Errors and refusals produced by the checkout flow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// Checkout cannot start from an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A gating contact field was empty; progression is blocked.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Payment was requested before contact details were submitted.
    #[error("Customer details have not been submitted")]
    DetailsNotSubmitted,

    /// The requested transition is not valid from the current stage.
    #[error("Checkout is not at the expected step (currently {current:?})")]
    OutOfStep { current: CheckoutStage },

    /// The provider reported a failure; the attempt is over, the cart is
    /// untouched.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Payment was captured but the order write failed. The cart is kept and
    /// the user must contact support — retrying would charge them again.
    #[error(
        "Payment was captured (reference {reference}) but the order could not \
         be recorded: {reason}. Contact support before paying again"
    )]
    OrderNotRecorded { reference: String, reason: String },
}

/// How a driven checkout attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Order recorded; cart cleared.
    Placed {
        order_id: String,
        reference: String,
    },
    /// The payer closed the popup; cart untouched, a fresh attempt may follow.
    Cancelled,
}

/// Everything frozen at the moment `AwaitingPayment` began.
#[derive(Debug, Clone)]
struct PaymentAttempt {
    reference: String,
    amount_minor: u64,
}

/// Converts a currency amount to integer minor units.
///
/// Rounding, not truncation: truncation would systematically undercharge on
/// amounts like 45.50 whose binary representation lands just below the true
/// value.
pub fn to_minor_units(amount: f64) -> u64 {
    (amount * 100.0).round() as u64
}

/// The state machine over one order attempt.
pub struct CheckoutFlow {
    stage: CheckoutStage,
    currency: String,
    customer: Option<CustomerDetails>,
    attempt: Option<PaymentAttempt>,
    provider_reference: Option<String>,
}

impl CheckoutFlow {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            stage: CheckoutStage::ReviewingCart,
            currency: currency.into(),
            customer: None,
            attempt: None,
            provider_reference: None,
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// `ReviewingCart → EnteringDetails`, allowed only for a non-empty cart.
    pub fn proceed_to_details(&mut self, cart: &CartStore) -> Result<(), CheckoutError> {
        if self.stage != CheckoutStage::ReviewingCart {
            return Err(CheckoutError::OutOfStep {
                current: self.stage,
            });
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.stage = CheckoutStage::EnteringDetails;
        Ok(())
    }

    /// Accepts the contact form.
    ///
    /// Name, email, and contact number must all be non-empty; address and
    /// message are deliberately not gating.
    pub fn submit_details(&mut self, customer: CustomerDetails) -> Result<(), CheckoutError> {
        if self.stage != CheckoutStage::EnteringDetails {
            return Err(CheckoutError::OutOfStep {
                current: self.stage,
            });
        }
        if let Some(field) = customer.missing_required() {
            return Err(CheckoutError::MissingField(field));
        }
        self.customer = Some(customer);
        Ok(())
    }

    /// `EnteringDetails → AwaitingPayment`: freezes the amount from the cart
    /// and mints the attempt's payment reference.
    ///
    /// Calling this again while already awaiting payment returns the same
    /// request — the reference is minted once per attempt, so a retried
    /// popup cannot show up at the provider under a second reference.
    pub fn begin_payment(&mut self, cart: &CartStore) -> Result<PaymentRequest, CheckoutError> {
        if self.stage == CheckoutStage::AwaitingPayment {
            if let (Some(attempt), Some(customer)) = (&self.attempt, &self.customer) {
                return Ok(PaymentRequest {
                    amount_minor: attempt.amount_minor,
                    currency: self.currency.clone(),
                    email: customer.email.clone(),
                    reference: attempt.reference.clone(),
                });
            }
        }
        if self.stage != CheckoutStage::EnteringDetails {
            return Err(CheckoutError::OutOfStep {
                current: self.stage,
            });
        }
        let customer = self
            .customer
            .as_ref()
            .ok_or(CheckoutError::DetailsNotSubmitted)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let amount_minor = to_minor_units(cart.total());
        let reference = mint_reference();
        info!(amount_minor, %reference, "Payment attempt started");

        let request = PaymentRequest {
            amount_minor,
            currency: self.currency.clone(),
            email: customer.email.clone(),
            reference: reference.clone(),
        };
        self.attempt = Some(PaymentAttempt {
            reference,
            amount_minor,
        });
        self.stage = CheckoutStage::AwaitingPayment;
        Ok(request)
    }

    /// Applies the gateway's verdict: `AwaitingPayment → PaymentSucceeded`
    /// or `PaymentCancelled`.
    ///
    /// A provider failure ends the attempt like a cancellation (cart
    /// untouched) but surfaces the reason.
    pub fn resolve_payment(
        &mut self,
        outcome: PaymentOutcome,
    ) -> Result<CheckoutStage, CheckoutError> {
        if self.stage != CheckoutStage::AwaitingPayment {
            return Err(CheckoutError::OutOfStep {
                current: self.stage,
            });
        }
        match outcome {
            PaymentOutcome::Succeeded { reference } => {
                info!(%reference, "Payment captured");
                self.provider_reference = Some(reference);
                self.stage = CheckoutStage::PaymentSucceeded;
                Ok(self.stage)
            }
            PaymentOutcome::Cancelled => {
                info!("Payment cancelled by payer");
                self.stage = CheckoutStage::PaymentCancelled;
                Ok(self.stage)
            }
            PaymentOutcome::Failed { reason } => {
                warn!(%reason, "Payment failed");
                self.stage = CheckoutStage::PaymentCancelled;
                Err(CheckoutError::PaymentFailed(reason))
            }
        }
    }

    /// `PaymentSucceeded → OrderPersisted | OrderPersistFailed`.
    ///
    /// On a confirmed write the cart is cleared; on a failed write it is
    /// deliberately kept and the distinct contact-support error is returned.
    pub async fn record_order(
        &mut self,
        cart: &mut CartStore,
        orders: &OrderClient,
        user_id: Option<String>,
    ) -> Result<String, CheckoutError> {
        if self.stage != CheckoutStage::PaymentSucceeded {
            return Err(CheckoutError::OutOfStep {
                current: self.stage,
            });
        }
        let customer = self
            .customer
            .clone()
            .ok_or(CheckoutError::DetailsNotSubmitted)?;
        let reference = self
            .provider_reference
            .clone()
            .or_else(|| self.attempt.as_ref().map(|a| a.reference.clone()))
            .unwrap_or_default();

        let items: Vec<LineItem> = cart
            .items()
            .iter()
            .map(|item| LineItem {
                product_id: item.dish_id.clone(),
                name: item.name.clone(),
                unit_price: crate::model::parse_price(&item.price),
                quantity: 1,
            })
            .collect();

        let order = OrderCreate {
            user_id,
            items,
            customer,
            total_amount: cart.total(),
            payment_reference: reference.clone(),
        };

        match orders.place_order(order).await {
            Ok(order_id) => {
                cart.clear();
                self.stage = CheckoutStage::OrderPersisted;
                info!(%order_id, "Order recorded, cart cleared");
                Ok(order_id)
            }
            Err(e) => {
                self.stage = CheckoutStage::OrderPersistFailed;
                warn!(error = %e, %reference, "Order write failed after captured payment");
                Err(CheckoutError::OrderNotRecorded {
                    reference,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Starts a fresh attempt after a cancellation. Contact details are
    /// kept; the next [`CheckoutFlow::begin_payment`] mints a new reference.
    pub fn retry_after_cancel(&mut self) -> Result<(), CheckoutError> {
        if self.stage != CheckoutStage::PaymentCancelled {
            return Err(CheckoutError::OutOfStep {
                current: self.stage,
            });
        }
        self.attempt = None;
        self.provider_reference = None;
        self.stage = CheckoutStage::EnteringDetails;
        Ok(())
    }

    /// Drives one attempt end to end: freeze the amount, run the popup,
    /// apply the verdict, and on success record the order.
    pub async fn place_order(
        &mut self,
        cart: &mut CartStore,
        gateway: &dyn PaymentGateway,
        orders: &OrderClient,
        user_id: Option<String>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let request = self.begin_payment(cart)?;
        let outcome = gateway.collect(request).await;

        match self.resolve_payment(outcome)? {
            CheckoutStage::PaymentSucceeded => {
                let reference = self.provider_reference.clone().unwrap_or_default();
                let order_id = self.record_order(cart, orders, user_id).await?;
                Ok(CheckoutOutcome::Placed {
                    order_id,
                    reference,
                })
            }
            _ => Ok(CheckoutOutcome::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dish;

    fn dish(id: &str, price: &str) -> Dish {
        Dish::new(
            id,
            format!("{} plate", id),
            price,
            true,
            false,
            format!("https://cdn.example/{}.jpg", id),
        )
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            name: "Ama Mensah".into(),
            email: "ama@example.com".into(),
            address: "123 Main Street, Accra".into(),
            number: "+233 504 388 888".into(),
            message: None,
        }
    }

    #[test]
    fn checkout_cannot_start_from_an_empty_cart() {
        let cart = CartStore::new();
        let mut flow = CheckoutFlow::new("GHS");
        assert_eq!(
            flow.proceed_to_details(&cart),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(flow.stage(), CheckoutStage::ReviewingCart);
    }

    #[test]
    fn empty_gating_field_blocks_progression() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));

        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();

        let mut form = details();
        form.name = "".into();
        assert_eq!(
            flow.submit_details(form),
            Err(CheckoutError::MissingField("name"))
        );

        // Without accepted details, payment cannot begin.
        assert_eq!(
            flow.begin_payment(&cart),
            Err(CheckoutError::DetailsNotSubmitted)
        );
        assert_eq!(flow.stage(), CheckoutStage::EnteringDetails);
    }

    #[test]
    fn address_and_message_are_not_gating() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));

        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();

        let mut form = details();
        form.address = "".into();
        form.message = None;
        assert!(flow.submit_details(form).is_ok());
    }

    #[test]
    fn amount_is_rounded_minor_units() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "45.50"));

        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();
        flow.submit_details(details()).unwrap();

        let request = flow.begin_payment(&cart).unwrap();
        assert_eq!(request.amount_minor, 4550);
        assert_eq!(request.currency, "GHS");
        assert_eq!(request.email, "ama@example.com");
    }

    #[test]
    fn minor_unit_conversion_rounds_instead_of_truncating() {
        assert_eq!(to_minor_units(45.50), 4550);
        assert_eq!(to_minor_units(15.50), 1550);
        assert_eq!(to_minor_units(0.1 + 0.2), 30);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[test]
    fn reference_is_stable_within_an_attempt() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));

        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();
        flow.submit_details(details()).unwrap();

        let first = flow.begin_payment(&cart).unwrap();
        let second = flow.begin_payment(&cart).unwrap();
        assert_eq!(first.reference, second.reference);
        assert_eq!(first, second);
    }

    #[test]
    fn fresh_attempt_mints_a_new_reference() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));

        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();
        flow.submit_details(details()).unwrap();

        let first = flow.begin_payment(&cart).unwrap();
        flow.resolve_payment(PaymentOutcome::Cancelled).unwrap();
        assert_eq!(flow.stage(), CheckoutStage::PaymentCancelled);

        flow.retry_after_cancel().unwrap();
        let second = flow.begin_payment(&cart).unwrap();
        assert_ne!(first.reference, second.reference);
    }

    #[test]
    fn provider_failure_ends_the_attempt_with_the_reason() {
        let mut cart = CartStore::new();
        cart.add(&dish("dish_1", "10.00"));

        let mut flow = CheckoutFlow::new("GHS");
        flow.proceed_to_details(&cart).unwrap();
        flow.submit_details(details()).unwrap();
        flow.begin_payment(&cart).unwrap();

        let result = flow.resolve_payment(PaymentOutcome::Failed {
            reason: "card declined".into(),
        });
        assert_eq!(
            result,
            Err(CheckoutError::PaymentFailed("card declined".into()))
        );
        assert_eq!(flow.stage(), CheckoutStage::PaymentCancelled);
        assert_eq!(cart.len(), 1, "a failed payment must not touch the cart");
    }

    #[test]
    fn transitions_are_rejected_out_of_order() {
        let mut flow = CheckoutFlow::new("GHS");
        assert!(matches!(
            flow.resolve_payment(PaymentOutcome::Cancelled),
            Err(CheckoutError::OutOfStep { .. })
        ));
        assert!(matches!(
            flow.retry_after_cancel(),
            Err(CheckoutError::OutOfStep { .. })
        ));
    }
}
