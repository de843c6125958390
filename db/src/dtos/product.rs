use uuid::Uuid;

pub struct ProductCreateRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub stock: i32,
    pub images: Vec<String>,
    pub rating: f64,
    pub is_hot_deal: bool,
    pub is_featured: bool,
}

/// Partial product update; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub stock: Option<i32>,
    pub images: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub is_hot_deal: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    LowToHigh,
    HighToLow,
}

/// Listing filter; every field is optional and absent fields add no
/// conditions to the query.
#[derive(Debug, Default)]
pub struct ProductFilter {
    pub hot_deals: bool,
    pub featured: bool,
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    pub sort: Option<PriceSort>,
}
