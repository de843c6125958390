use serde::{Deserialize, Serialize};
use uuid::Uuid;

use db::models::cart::{Cart, CartLine};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// Cart together with its lines, as returned by every cart endpoint.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub cart: Cart,
    pub items: Vec<CartLine>,
}
