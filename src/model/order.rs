use serde::{Deserialize, Serialize};

/// One purchased dish inside an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Contact details collected at checkout; they travel with the order and
/// have no persistence of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub number: String,
    pub message: Option<String>,
}

impl CustomerDetails {
    /// The first required contact field that is empty, if any.
    ///
    /// Name, email, and contact number gate checkout; address and message
    /// deliberately do not.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else if self.number.trim().is_empty() {
            Some("number")
        } else {
            None
        }
    }
}

/// Lifecycle state of an order. The storefront only ever writes `Pending`;
/// fulfillment systems own the later transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
}

/// A submitted order.
///
/// Owned by the hosted `orders` collection and immutable from the
/// storefront once written. `created_at_ms` is stamped by the store at
/// write time.
///
/// # Document Store
/// This struct implements the [`Record`](crate::store::Record) trait; see
/// [`order_store`](crate::order_store) for the boundary validation applied
/// on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: Option<String>,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub customer: CustomerDetails,
    pub payment_reference: String,
    pub status: OrderStatus,
    pub created_at_ms: u64,
}

/// Payload for writing a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: Option<String>,
    pub items: Vec<LineItem>,
    pub customer: CustomerDetails,
    pub total_amount: f64,
    pub payment_reference: String,
}
