use uuid::Uuid;

pub struct CartItemNew {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}
