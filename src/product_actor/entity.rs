use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};
use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;

/// Rating given to products that have not been reviewed yet.
pub const INITIAL_RATING: f64 = 4.5;

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    const STORAGE_KEY: &'static str = "product-storage";
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &String { &self.id }

    /// Creates a new, active Product with the initial rating.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the product
    /// * `params` - Product creation parameters
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            image: params.image,
            category: params.category,
            stock: params.stock,
            rating: INITIAL_RATING,
            vendor_id: params.vendor_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges the provided fields and refreshes `updated_at`.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(vendor_id) = patch.vendor_id {
            self.vendor_id = Some(vendor_id);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `Restock(amount)`: Increments stock by the specified amount, saturating
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::Restock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                self.updated_at = Utc::now();
                Ok(ProductActionResult::StockLevel(self.stock))
            }
        }
    }
}
