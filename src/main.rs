mod domain;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actors;
mod cart;
mod error;
mod messages;
mod notify;
mod persistence;

use tracing::{info, warn, Instrument};
use crate::app_system::{setup_tracing, CartSystem};
use crate::domain::Product;
use crate::notify::TracingNotifier;
use crate::persistence::FileSnapshot;

fn shop_fixture() -> Vec<(Product, u32)> {
    vec![
        (Product::new(1, "Trail Runner", 179.9, "https://shop.example/img/trail-runner.jpg"), 3),
        (Product::new(2, "Court Classic", 139.9, "https://shop.example/img/court-classic.jpg"), 5),
    ]
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application with complete cart system");

    let snapshot_dir = std::env::temp_dir().join("cart-system");
    info!(dir = %snapshot_dir.display(), "Snapshot directory");

    // Create the entire cart system (starts all services); the cart comes up
    // with whatever the last run persisted.
    let system = CartSystem::new(
        shop_fixture(),
        Box::new(FileSnapshot::new(&snapshot_dir)),
        Box::new(TracingNotifier),
    );

    let span = tracing::info_span!("shopping_flow");
    async {
        let restored = system.cart_client.get_cart().await.map_err(|e| e.to_string())?;
        info!(items = restored.len(), "Cart restored");

        // Start the demo run from a clean cart so reruns behave the same
        for item in restored {
            system.cart_client.remove_product(item.id).await.map_err(|e| e.to_string())?;
        }

        // Three units of the trail runner fit, the fourth exceeds stock
        for attempt in 1..=4u32 {
            match system.cart_client.add_product(1).await {
                Ok(()) => info!(attempt, "Added trail runner"),
                Err(e) => warn!(attempt, error = %e, "Add rejected"),
            }
        }

        // Exact quantity update, within stock
        system.cart_client.add_product(2).await.map_err(|e| e.to_string())?;
        system.cart_client.update_amount(2, 2).await.map_err(|e| e.to_string())?;
        info!("Court classic set to 2 units");

        // Beyond stock and unknown products both bounce with a notification
        if let Err(e) = system.cart_client.update_amount(2, 99).await {
            warn!(error = %e, "Update rejected");
        }
        if let Err(e) = system.cart_client.add_product(9).await {
            warn!(error = %e, "Add rejected");
        }
        if let Err(e) = system.cart_client.remove_product(3).await {
            warn!(error = %e, "Remove rejected");
        }

        let cart = system.cart_client.get_cart().await.map_err(|e| e.to_string())?;
        for item in &cart {
            info!(id = item.id, name = %item.name, amount = item.amount, price = item.price, "Cart line");
        }

        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully; the snapshot keeps the cart for next run
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
