use serde::{Deserialize, Serialize};

use super::{Course, Product};

/// An item a shopper picked, before a quantity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl From<&Product> for CartEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

impl From<&Course> for CartEntry {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            name: course.title.clone(),
            price: course.price,
            image: course.thumbnail.clone(),
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl From<CartEntry> for CartItem {
    fn from(entry: CartEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            price: entry.price,
            image: entry.image,
            quantity: 1,
        }
    }
}
