use tokio::sync::mpsc;

use crate::cart_actor::CartError;
use crate::domain::{CartEntry, CartItem};
use crate::messages::CartRequest;

/// Client for interacting with the cart service.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CartClient => fn add_item(entry: CartEntry) -> CartItem as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn update_quantity(id: String, quantity: u32) -> Option<CartItem> as CartRequest::UpdateQuantity, Error = CartError);
client_method!(CartClient => fn remove_item(id: String) -> bool as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn clear_cart() -> () as CartRequest::Clear, Error = CartError);
client_method!(CartClient => fn take_items() -> Vec<CartItem> as CartRequest::Take, Error = CartError);
client_method!(CartClient => fn restore_items(items: Vec<CartItem>) -> () as CartRequest::Restore, Error = CartError, skip = [items]);
client_method!(CartClient => fn items() -> Vec<CartItem> as CartRequest::Items, Error = CartError);
client_method!(CartClient => fn total() -> f64 as CartRequest::Total, Error = CartError);
client_method!(CartClient => fn item_count() -> u32 as CartRequest::ItemCount, Error = CartError);
