//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod platform;
pub mod tracing;

pub use error::*;
pub use platform::*;
pub use self::tracing::*;
