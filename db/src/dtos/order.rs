use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub phone_number: String,
}

pub struct OrderCreateRequest {
    pub user_id: Uuid,
    pub payment_method: String,
    pub address: ShippingAddress,
    pub total_amount: f64,
}

/// Immutable line snapshot taken from the cart at checkout.
pub struct OrderItemSnapshot {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price at the time of checkout.
    pub price: f64,
    /// price × quantity.
    pub total: f64,
}
