//! Course catalog logic, including lesson progress tracking.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
