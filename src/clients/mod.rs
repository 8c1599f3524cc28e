use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};
use crate::messages::{CartRequest, CatalogRequest, StockRequest};
use crate::domain::{Cart, Product, ProductId, StockInfo};
use crate::error::{CartError, CatalogError, StockError};

/// Generates a client method that sends one typed request and awaits the
/// oneshot reply, mapping channel failures onto the service's error type.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// 1. Stock Client
// =============================================================================

/// Handle for querying the stock service.
#[derive(Clone)]
pub struct StockClient {
    sender: mpsc::Sender<StockRequest>,
}

impl StockClient {
    pub fn new(sender: mpsc::Sender<StockRequest>) -> Self {
        Self { sender }
    }
}

client_method!(StockClient => fn get_stock(id: ProductId) -> StockInfo as StockRequest::GetStock, Error = StockError);

impl StockClient {
    /// Ask the service to stop once already-queued requests are drained.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(StockRequest::Shutdown).await;
    }
}

// =============================================================================
// 2. Catalog Client
// =============================================================================

/// Handle for querying the product catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CatalogClient => fn get_product(id: ProductId) -> Product as CatalogRequest::GetProduct, Error = CatalogError);

impl CatalogClient {
    /// Ask the service to stop once already-queued requests are drained.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(CatalogRequest::Shutdown).await;
    }
}

// =============================================================================
// 3. Cart Client
// =============================================================================

/// Handle for reading and mutating the cart.
///
/// Mutations resolve to `Ok(())` once the cart service has committed the new
/// list and its snapshot; an `Err` means the cart is untouched and the user
/// has already been notified with the human-readable message.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CartClient => fn get_cart() -> Cart as CartRequest::GetCart, Error = CartError);
client_method!(CartClient => fn add_product(id: ProductId) -> () as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(id: ProductId) -> () as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_amount(id: ProductId, amount: u32) -> () as CartRequest::UpdateAmount, Error = CartError);

impl CartClient {
    /// Ask the service to stop once already-queued requests are drained.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(CartRequest::Shutdown).await;
    }
}
