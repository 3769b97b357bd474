use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to the given status if the transition is allowed.
    UpdateStatus(OrderStatus),
}
