//! Cloneable handles used to talk to the store actors.

#[macro_use]
mod macros;

mod auth_client;
mod cart_client;
mod course_client;
mod order_client;
mod product_client;

pub use auth_client::AuthClient;
pub use cart_client::CartClient;
pub use course_client::CourseClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
