//! Snapshot codec: the cart serialized as a JSON array of items.
//!
//! The format carries no version tag. The bootstrap path treats anything
//! undecodable as an absent snapshot, which is the same recovery a version
//! bump would need.

use crate::domain::Cart;

pub fn encode(cart: &Cart) -> serde_json::Result<String> {
    serde_json::to_string(cart)
}

pub fn decode(raw: &str) -> serde_json::Result<Cart> {
    serde_json::from_str(raw)
}
