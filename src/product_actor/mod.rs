//! Product-specific domain logic, including stock actions and form intake.

mod actions;
pub mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
