use tokio::sync::oneshot;

use crate::auth_actor::AuthError;
use crate::cart_actor::CartError;
use crate::domain::{CartEntry, CartItem, Session, Signup, User, UserFilter};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for the hand-written services. Each variant includes
/// parameters and a oneshot channel for responses.

#[derive(Debug)]
pub enum AuthRequest {
    Login {
        email: String,
        password: String,
        respond_to: ServiceResponse<User, AuthError>,
    },
    Signup {
        signup: Signup,
        respond_to: ServiceResponse<User, AuthError>,
    },
    Logout {
        respond_to: ServiceResponse<(), AuthError>,
    },
    CurrentSession {
        respond_to: ServiceResponse<Session, AuthError>,
    },
    ListUsers {
        filter: UserFilter,
        respond_to: ServiceResponse<Vec<User>, AuthError>,
    },
}

#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        entry: CartEntry,
        respond_to: ServiceResponse<CartItem, CartError>,
    },
    UpdateQuantity {
        id: String,
        quantity: u32,
        respond_to: ServiceResponse<Option<CartItem>, CartError>,
    },
    RemoveItem {
        id: String,
        respond_to: ServiceResponse<bool, CartError>,
    },
    Clear {
        respond_to: ServiceResponse<(), CartError>,
    },
    /// Returns every line and empties the cart in one step.
    Take {
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    /// Puts taken lines back in front, merging with lines added since.
    Restore {
        items: Vec<CartItem>,
        respond_to: ServiceResponse<(), CartError>,
    },
    Items {
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    Total {
        respond_to: ServiceResponse<f64, CartError>,
    },
    ItemCount {
        respond_to: ServiceResponse<u32, CartError>,
    },
}
