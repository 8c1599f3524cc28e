use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// One distinct product in the cart together with the requested quantity.
///
/// `amount` is always at least 1; a line that would drop to 0 is removed
/// from the cart instead of being kept around empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub amount: u32,
}

/// The user's current selection: ordered, at most one entry per product id.
pub type Cart = Vec<CartItem>;

impl CartItem {
    /// First unit of a product entering the cart.
    pub fn first_of(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            amount: 1,
        }
    }
}
