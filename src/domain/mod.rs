pub mod product;
pub mod stock;
pub mod cart;

pub use product::*;
pub use stock::*;
pub use cart::*;
