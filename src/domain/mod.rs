pub mod user;
pub mod course;
pub mod product;
pub mod order;
pub mod cart;

pub use user::*;
pub use course::*;
pub use product::*;
pub use order::*;
pub use cart::*;
