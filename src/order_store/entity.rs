//! [`Record`] implementation for the Order document type.
//!
//! Orders are write-once from the storefront: the update and action types
//! are `()`. The create path enforces the money invariant — the stated
//! total must equal the sum of the line items.

use async_trait::async_trait;

use crate::model::{Order, OrderCreate, OrderStatus};
use crate::store::Record;

/// Tolerance for comparing a stated total against the line-item sum;
/// anything past half a minor unit is a real disagreement.
const TOTAL_TOLERANCE: f64 = 0.005;

#[async_trait]
impl Record for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type UpdateParams = ();
    type Action = ();
    type ActionResult = ();

    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.items.is_empty() {
            return Err("order has no line items".to_string());
        }
        if params.payment_reference.trim().is_empty() {
            return Err("order has no payment reference".to_string());
        }

        let line_sum: f64 = params.items.iter().map(|item| item.subtotal()).sum();
        if (line_sum - params.total_amount).abs() > TOTAL_TOLERANCE {
            return Err(format!(
                "order total {} disagrees with line items {}",
                params.total_amount, line_sum
            ));
        }

        Ok(Self {
            id,
            user_id: params.user_id,
            items: params.items,
            total_amount: params.total_amount,
            customer: params.customer,
            payment_reference: params.payment_reference,
            status: OrderStatus::Pending,
            created_at_ms: 0,
        })
    }

    fn on_persist(&mut self, created_at_ms: u64) {
        self.created_at_ms = created_at_ms;
    }

    async fn on_update(&mut self, _update: ()) -> Result<(), String> {
        Err("orders are immutable once written".to_string())
    }

    async fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
