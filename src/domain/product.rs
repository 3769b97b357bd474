use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a product in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub stock: u32,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub stock: u32,
    pub vendor_id: Option<String>,
}

/// Fields to merge into an existing product. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub rating: Option<f64>,
    pub vendor_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Shop search criteria, applied to active products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    /// Exact category; `None` means all categories.
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
            }
            None => true,
        };
        let matches_category = self.category.as_deref().map_or(true, |c| product.category == c);
        product.is_active && matches_search && matches_category
    }
}
