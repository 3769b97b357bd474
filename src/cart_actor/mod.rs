//! The shopping cart: an ephemeral, in-memory list of line items.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
