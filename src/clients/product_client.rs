use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductFilter, ProductPatch};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, ProductForm};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product, products);

impl ProductClient {
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(product).await
    }

    /// Adds a product from the vendor form, applying the form's fallbacks.
    #[instrument(skip(self, form))]
    pub async fn add_product_from_form(&self, form: ProductForm, vendor_id: String) -> Result<Product, ProductError> {
        self.add_product(form.into_create(vendor_id)).await
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn get_active_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.query(|product: &Product| product.is_active).await
    }

    /// Active products owned by `vendor_id`.
    #[instrument(skip(self))]
    pub async fn get_products_by_vendor(&self, vendor_id: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .query(move |product: &Product| product.is_active && product.vendor_id.as_deref() == Some(vendor_id.as_str()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.query(move |product: &Product| filter.matches(product)).await
    }

    /// Distinct categories of active products, in first-seen order.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, ProductError> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.get_active_products().await? {
            if !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<Option<u32>, ProductError> {
        debug!("Sending request");
        let result = self.inner.perform_action(id, ProductAction::CheckStock).await?;
        Ok(result.map(|ProductActionResult::StockLevel(level)| level))
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: String, amount: u32) -> Result<Option<u32>, ProductError> {
        debug!("Sending request");
        let result = self.inner.perform_action(id, ProductAction::Restock(amount)).await?;
        Ok(result.map(|ProductActionResult::StockLevel(level)| level))
    }
}
