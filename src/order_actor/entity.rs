use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};
use super::actions::OrderAction;
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders only change through status actions
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Error = OrderError;

    const STORAGE_KEY: &'static str = "order-storage";
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order from creation parameters.
    ///
    /// # Notes
    /// The order starts `Pending` and its total is the sum of the line items
    /// at this moment.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        let total = params.total();
        Ok(Self {
            id,
            customer_id: params.customer_id,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            items: params.items,
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            vendor_id: params.vendor_id,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    /// Handles order-specific actions.
    ///
    /// # Errors
    /// `InvalidTransition` when the target status does not follow the current one.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderStatus, OrderError> {
        match action {
            OrderAction::UpdateStatus(to) => {
                if !self.status.can_transition_to(to) {
                    return Err(OrderError::InvalidTransition { from: self.status, to });
                }
                self.status = to;
                Ok(to)
            }
        }
    }
}
