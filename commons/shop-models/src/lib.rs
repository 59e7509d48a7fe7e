pub mod cart;
pub mod order;
pub mod paths;
pub mod product;
pub mod request;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use request::*;
pub use user::*;
