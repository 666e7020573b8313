use serde::{Deserialize, Serialize};
use tracing::warn;

/// A dish on the menu.
///
/// Dishes are owned by the hosted `dishes` collection; the storefront only
/// holds transient copies fetched on demand. The price is kept as the
/// decimal string the storage service returns — see [`parse_price`] for the
/// tolerant conversion used when money is computed.
///
/// # Document Store
/// This struct implements the [`Record`](crate::store::Record) trait, so it
/// can be managed by a [`Collection`](crate::store::Collection). See
/// [`dish_store`](crate::dish_store) for:
/// - Creation parameters ([`DishCreate`])
/// - Update parameters ([`DishUpdate`])
/// - Custom actions ([`DishAction`](crate::dish_store::DishAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub price: String,
    pub in_stock: bool,
    pub favorite: bool,
    pub image_url: String,
}

impl Dish {
    /// Creates a new Dish instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (assigned by the store on create)
    /// * `name` - Display name
    /// * `price` - Decimal price string, e.g. `"35.00"`
    /// * `in_stock` - Whether the dish can currently be ordered
    /// * `favorite` - Owner-curated highlight flag
    /// * `image_url` - Public URL of the dish photo
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        in_stock: bool,
        favorite: bool,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            in_stock,
            favorite,
            image_url: image_url.into(),
        }
    }

    /// The dish price as a number, zero if the stored string is malformed.
    pub fn price_value(&self) -> f64 {
        parse_price(&self.price)
    }
}

/// Parses a decimal price string, degrading to zero on bad data.
///
/// A malformed price must never take down a total computation; it
/// contributes nothing and is logged for follow-up.
pub fn parse_price(price: &str) -> f64 {
    match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(price, "Unparsable price treated as zero");
            0.0
        }
    }
}

/// Payload for creating a new dish.
///
/// New dishes always start with `favorite` unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub price: String,
    pub in_stock: bool,
    pub image_url: String,
}

/// Payload for a partial dish update.
///
/// `image_url: None` keeps the stored image; the favorite flag is toggled
/// through a [`DishAction`](crate::dish_store::DishAction) instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub price: Option<String>,
    pub in_stock: Option<bool>,
    pub image_url: Option<String>,
}
