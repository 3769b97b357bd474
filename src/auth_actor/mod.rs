//! Authentication: credential checks, sign-up and the persisted session.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
