use serde::Deserialize;
use uuid::Uuid;

use db::dtos::product::{PriceSort, ProductFilter};

/// Query string of the product listing endpoint. `query` selects a
/// curated collection (`hot-deals` or `featured`), `sort` orders by
/// price (`LTH` or `HTL`). Unknown values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub query: Option<String>,
    pub category: Option<Uuid>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ProductListQuery {
    pub fn into_filter(self) -> ProductFilter {
        ProductFilter {
            hot_deals: self.query.as_deref() == Some("hot-deals"),
            featured: self.query.as_deref() == Some("featured"),
            category_id: self.category,
            search: self.search.filter(|s| !s.trim().is_empty()),
            sort: match self.sort.as_deref() {
                Some("LTH") => Some(PriceSort::LowToHigh),
                Some("HTL") => Some(PriceSort::HighToLow),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub stock: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_hot_deal: bool,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
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

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_query_maps_to_flags() {
        let filter = ProductListQuery {
            query: Some("hot-deals".to_string()),
            ..Default::default()
        }
        .into_filter();
        assert!(filter.hot_deals);
        assert!(!filter.featured);

        let filter = ProductListQuery {
            query: Some("featured".to_string()),
            ..Default::default()
        }
        .into_filter();
        assert!(filter.featured);
    }

    #[test]
    fn sort_codes_map_to_price_ordering() {
        let filter = ProductListQuery {
            sort: Some("LTH".to_string()),
            ..Default::default()
        }
        .into_filter();
        assert_eq!(filter.sort, Some(PriceSort::LowToHigh));

        let filter = ProductListQuery {
            sort: Some("HTL".to_string()),
            ..Default::default()
        }
        .into_filter();
        assert_eq!(filter.sort, Some(PriceSort::HighToLow));
    }

    #[test]
    fn unknown_values_and_blank_search_are_ignored() {
        let filter = ProductListQuery {
            query: Some("bestsellers".to_string()),
            search: Some("   ".to_string()),
            sort: Some("price".to_string()),
            ..Default::default()
        }
        .into_filter();

        assert!(!filter.hot_deals);
        assert!(!filter.featured);
        assert!(filter.search.is_none());
        assert!(filter.sort.is_none());
    }
}
