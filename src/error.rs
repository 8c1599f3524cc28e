use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    #[error("No stock record for product: {0}")]
    NotFound(ProductId),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    OutOfStock { requested: u32, available: u32 },
    #[error("Shop service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
