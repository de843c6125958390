use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub stock: i32,
    pub images: Vec<String>,
    pub rating: f64,
    pub is_hot_deal: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
