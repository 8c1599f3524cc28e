use tracing::{error, info};
use crate::actors::{CatalogService, StockService};
use crate::cart::CartService;
use crate::clients::{CartClient, CatalogClient, StockClient};
use crate::domain::Product;
use crate::notify::Notifier;
use crate::persistence::SnapshotStore;

/// The main application system that wires the cart to the shop services.
///
/// Responsible for seeding and starting the actors, handing out the clients,
/// and joining everything on shutdown. The snapshot store and notifier are
/// injected so callers decide where state lives and where messages go.
pub struct CartSystem {
    pub cart_client: CartClient,
    pub stock_client: StockClient,
    pub catalog_client: CatalogClient,
    cart_handle: tokio::task::JoinHandle<()>,
    shop_handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    pub fn new(
        shop: Vec<(Product, u32)>,
        store: Box<dyn SnapshotStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        // 1. Shop services, seeded with the catalog and its stock levels
        let levels: Vec<_> = shop.iter().map(|(product, amount)| (product.id, *amount)).collect();
        let products: Vec<_> = shop.into_iter().map(|(product, _)| product).collect();

        let (stock_service, stock_client) = StockService::new(32, levels);
        let stock_handle = tokio::spawn(stock_service.run());

        let (catalog_service, catalog_client) = CatalogService::new(32, products);
        let catalog_handle = tokio::spawn(catalog_service.run());

        // 2. Cart service on top of the shop clients
        let (cart_service, cart_client) = CartService::new(
            32,
            stock_client.clone(),
            catalog_client.clone(),
            store,
            notifier,
        );
        let cart_handle = tokio::spawn(cart_service.run());

        Self {
            cart_client,
            stock_client,
            catalog_client,
            cart_handle,
            shop_handles: vec![stock_handle, catalog_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Cart first, so every mutation it accepted still has live shop
        // services behind it.
        self.cart_client.shutdown().await;
        Self::join(self.cart_handle).await?;

        self.stock_client.shutdown().await;
        self.catalog_client.shutdown().await;
        for handle in self.shop_handles {
            Self::join(handle).await?;
        }

        info!("System shutdown complete.");
        Ok(())
    }

    async fn join(handle: tokio::task::JoinHandle<()>) -> Result<(), String> {
        if let Err(e) = handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }
        Ok(())
    }
}
