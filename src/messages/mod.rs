use tokio::sync::oneshot;
use crate::domain::{Cart, Product, ProductId, StockInfo};
use crate::error::{CartError, CatalogError, StockError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes parameters
/// and a oneshot channel for responses.

#[derive(Debug)]
pub enum StockRequest {
    GetStock {
        id: ProductId,
        respond_to: ServiceResponse<StockInfo, StockError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum CatalogRequest {
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum CartRequest {
    GetCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    AddProduct {
        id: ProductId,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveProduct {
        id: ProductId,
        respond_to: ServiceResponse<(), CartError>,
    },
    UpdateAmount {
        id: ProductId,
        amount: u32,
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}
