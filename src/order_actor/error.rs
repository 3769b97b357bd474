use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Checkout requires a signed-in user")]
    NotSignedIn,
    #[error("Cannot check out an empty cart")]
    EmptyCart,
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Cart error: {0}")]
    Cart(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
