use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CartClient;
use crate::domain::{CartEntry, CartItem};
use crate::messages::{CartRequest, ServiceResponse};
use super::error::CartError;

/// Cart actor. Lines keep the order in which they were first added.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    items: Vec<CartItem>,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, items: Vec::new() };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { entry, respond_to } => self.handle_add_item(entry, respond_to),
                CartRequest::UpdateQuantity { id, quantity, respond_to } => {
                    self.handle_update_quantity(id, quantity, respond_to)
                }
                CartRequest::RemoveItem { id, respond_to } => self.handle_remove_item(id, respond_to),
                CartRequest::Clear { respond_to } => {
                    self.items.clear();
                    info!("Cart cleared");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Take { respond_to } => {
                    let taken = std::mem::take(&mut self.items);
                    info!(lines = taken.len(), "Cart taken");
                    let _ = respond_to.send(Ok(taken));
                }
                CartRequest::Restore { items, respond_to } => self.handle_restore(items, respond_to),
                CartRequest::Items { respond_to } => {
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                CartRequest::Total { respond_to } => {
                    let _ = respond_to.send(Ok(self.total()));
                }
                CartRequest::ItemCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.item_count()));
                }
            }
        }
        info!("CartService stopped");
    }

    fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    fn item_count(&self) -> u32 {
        self.items.iter().fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Merges by id: an existing line gains one unit, otherwise a new line of one.
    #[instrument(fields(item_id = %entry.id), skip(self, entry, respond_to))]
    fn handle_add_item(&mut self, entry: CartEntry, respond_to: ServiceResponse<CartItem, CartError>) {
        let item = match self.items.iter_mut().find(|item| item.id == entry.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                existing.clone()
            }
            None => {
                let item = CartItem::from(entry);
                self.items.push(item.clone());
                item
            }
        };
        debug!(quantity = item.quantity, "Item added to cart");
        let _ = respond_to.send(Ok(item));
    }

    /// Sets the quantity of a line. Zero removes the line.
    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_update_quantity(
        &mut self,
        id: String,
        quantity: u32,
        respond_to: ServiceResponse<Option<CartItem>, CartError>,
    ) {
        if quantity == 0 {
            self.items.retain(|item| item.id != id);
            let _ = respond_to.send(Ok(None));
            return;
        }
        let updated = self.items.iter_mut().find(|item| item.id == id).map(|item| {
            item.quantity = quantity;
            item.clone()
        });
        if updated.is_none() {
            debug!("Quantity update for unknown item ignored");
        }
        let _ = respond_to.send(Ok(updated));
    }

    /// Restored lines go first in their old order; lines added in the
    /// meantime are merged into them by id or kept after them.
    #[instrument(fields(lines = items.len()), skip(self, items, respond_to))]
    fn handle_restore(&mut self, items: Vec<CartItem>, respond_to: ServiceResponse<(), CartError>) {
        let mut restored = items;
        for item in self.items.drain(..) {
            match restored.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => restored.push(item),
            }
        }
        self.items = restored;
        info!("Cart restored");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_remove_item(&mut self, id: String, respond_to: ServiceResponse<bool, CartError>) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let _ = respond_to.send(Ok(self.items.len() != before));
    }
}
