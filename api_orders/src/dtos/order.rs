use serde::{Deserialize, Serialize};

use db::{
    dtos::order::ShippingAddress,
    models::order::{Order, OrderItem},
};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub payment_method: String,
    pub address: ShippingAddress,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Order together with its immutable line snapshots.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
