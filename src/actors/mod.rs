use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use crate::domain::{Product, ProductId, StockInfo};
use crate::error::{CatalogError, StockError};
use crate::messages::{CatalogRequest, ServiceResponse, StockRequest};
use crate::clients::{CatalogClient, StockClient};

// =============================================================================
// STOCK SERVICE
// =============================================================================

/// Serves current availability per product, keyed by product id.
///
/// Stands in for the remote stock endpoint: callers only see the client and
/// the `StockInfo`/`StockError` surface, never this table.
pub struct StockService {
    receiver: mpsc::Receiver<StockRequest>,
    levels: HashMap<ProductId, u32>,
}

impl StockService {
    pub fn new(
        buffer_size: usize,
        levels: impl IntoIterator<Item = (ProductId, u32)>,
    ) -> (Self, StockClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            levels: levels.into_iter().collect(),
        };
        let client = StockClient::new(sender);
        (service, client)
    }

    #[instrument(name = "stock_service", skip(self))]
    pub async fn run(mut self) {
        info!("StockService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StockRequest::GetStock { id, respond_to } => {
                    self.handle_get_stock(id, respond_to);
                }
                StockRequest::Shutdown => {
                    info!("StockService shutting down");
                    break;
                }
            }
        }
        info!("StockService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_stock(&self, id: ProductId, respond_to: ServiceResponse<StockInfo, StockError>) {
        debug!("Processing get_stock request");
        let result = match self.levels.get(&id) {
            Some(&amount) => {
                debug!(amount, "Stock level found");
                Ok(StockInfo::new(id, amount))
            }
            None => {
                warn!("No stock record");
                Err(StockError::NotFound(id))
            }
        };
        let _ = respond_to.send(result);
    }
}

// =============================================================================
// CATALOG SERVICE
// =============================================================================

/// Serves product display metadata, keyed by product id.
///
/// Stands in for the remote product endpoint.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: HashMap<ProductId, Product>,
}

impl CatalogService {
    pub fn new(
        buffer_size: usize,
        products: impl IntoIterator<Item = Product>,
    ) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }
        info!("CatalogService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: ProductId, respond_to: ServiceResponse<Product, CatalogError>) {
        debug!("Processing get_product request");
        let result = match self.products.get(&id) {
            Some(product) => {
                debug!(product_name = %product.name, "Product found");
                Ok(product.clone())
            }
            None => {
                warn!("Product not in catalog");
                Err(CatalogError::NotFound(id))
            }
        };
        let _ = respond_to.send(result);
    }
}
