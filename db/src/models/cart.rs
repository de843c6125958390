use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Cart line joined with the current product price, used for totals and
/// order placement.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: f64,
    pub stock: i32,
    pub name: String,
}
