use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::snapshot;
use crate::clients::{CartClient, CatalogClient, StockClient};
use crate::domain::{Cart, CartItem, ProductId};
use crate::error::{CartError, CatalogError, StockError};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notify::Notifier;
use crate::persistence::{SnapshotStore, CART_SNAPSHOT_KEY};

/// User-facing messages surfaced through the notifier.
pub const OUT_OF_STOCK_MESSAGE: &str = "requested quantity exceeds available stock";
pub const ADD_FAILED_MESSAGE: &str = "could not add product";
pub const REMOVE_FAILED_MESSAGE: &str = "could not remove product";
pub const UPDATE_FAILED_MESSAGE: &str = "could not update quantity";

// =============================================================================
// CART SERVICE
// =============================================================================

/// Root actor owning the authoritative cart.
///
/// One request is handled to completion before the next is taken from the
/// mailbox, so a stock check always immediately precedes the write it
/// validates, no matter how many clients call concurrently.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    stock_client: StockClient,
    catalog_client: CatalogClient,
    store: Box<dyn SnapshotStore>,
    notifier: Box<dyn Notifier>,
    cart: Cart,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        stock_client: StockClient,
        catalog_client: CatalogClient,
        store: Box<dyn SnapshotStore>,
        notifier: Box<dyn Notifier>,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let cart = Self::bootstrap(store.as_ref());
        let service = Self {
            receiver,
            stock_client,
            catalog_client,
            store,
            notifier,
            cart,
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    /// Starting state: the persisted snapshot if one decodes, empty otherwise.
    /// A snapshot that fails to decode is discarded rather than refusing to
    /// start.
    fn bootstrap(store: &dyn SnapshotStore) -> Cart {
        match store.read(CART_SNAPSHOT_KEY) {
            Some(raw) => match snapshot::decode(&raw) {
                Ok(cart) => {
                    info!(items = cart.len(), "Cart restored from snapshot");
                    cart
                }
                Err(error) => {
                    warn!(%error, "Discarding unreadable cart snapshot");
                    Cart::new()
                }
            },
            None => Cart::new(),
        }
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::GetCart { respond_to } => {
                    self.handle_get_cart(respond_to);
                }
                CartRequest::AddProduct { id, respond_to } => {
                    self.handle_add_product(id, respond_to).await;
                }
                CartRequest::RemoveProduct { id, respond_to } => {
                    self.handle_remove_product(id, respond_to);
                }
                CartRequest::UpdateAmount { id, amount, respond_to } => {
                    self.handle_update_amount(id, amount, respond_to).await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_cart(&self, respond_to: ServiceResponse<Cart, CartError>) {
        debug!("Processing get_cart request");
        let _ = respond_to.send(Ok(self.cart.clone()));
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    async fn handle_add_product(&mut self, id: ProductId, respond_to: ServiceResponse<(), CartError>) {
        info!("Processing add_product request");

        // Step 1: Current availability, checked before any write
        let stock = match self.stock_client.get_stock(id).await {
            Ok(stock) => stock,
            Err(e) => {
                return self.reject(classify_stock_error(e), ADD_FAILED_MESSAGE, respond_to);
            }
        };

        match self.cart.iter().position(|item| item.id == id) {
            // Step 2a: Already in the cart, one more unit
            Some(index) => {
                let requested = self.cart[index].amount + 1;
                if stock.amount < requested {
                    return self.reject(
                        CartError::OutOfStock { requested, available: stock.amount },
                        ADD_FAILED_MESSAGE,
                        respond_to,
                    );
                }
                let mut next = self.cart.clone();
                next[index].amount = requested;
                self.commit(next);
                info!(amount = requested, "Product amount increased");
                let _ = respond_to.send(Ok(()));
            }
            // Step 2b: New line, fetch metadata first
            None => {
                if stock.amount < 1 {
                    return self.reject(
                        CartError::OutOfStock { requested: 1, available: stock.amount },
                        ADD_FAILED_MESSAGE,
                        respond_to,
                    );
                }
                let product = match self.catalog_client.get_product(id).await {
                    Ok(product) => product,
                    Err(e) => {
                        return self.reject(classify_catalog_error(e), ADD_FAILED_MESSAGE, respond_to);
                    }
                };
                let mut next = self.cart.clone();
                next.push(CartItem::first_of(product));
                self.commit(next);
                info!("Product added to cart");
                let _ = respond_to.send(Ok(()));
            }
        }
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_remove_product(&mut self, id: ProductId, respond_to: ServiceResponse<(), CartError>) {
        info!("Processing remove_product request");

        let index = match self.cart.iter().position(|item| item.id == id) {
            Some(index) => index,
            None => {
                return self.reject(CartError::ProductNotFound(id), REMOVE_FAILED_MESSAGE, respond_to);
            }
        };

        let mut next = self.cart.clone();
        next.remove(index);
        self.commit(next);
        info!("Product removed from cart");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    async fn handle_update_amount(
        &mut self,
        id: ProductId,
        amount: u32,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        info!("Processing update_amount request");

        // Quantities below 1 are the caller's cue to remove, not an update.
        // No stock query, no write, no notification.
        if amount < 1 {
            debug!("Ignoring non-positive amount");
            let _ = respond_to.send(Ok(()));
            return;
        }

        let index = match self.cart.iter().position(|item| item.id == id) {
            Some(index) => index,
            None => {
                return self.reject(CartError::ProductNotFound(id), UPDATE_FAILED_MESSAGE, respond_to);
            }
        };

        let stock = match self.stock_client.get_stock(id).await {
            Ok(stock) => stock,
            Err(e) => {
                return self.reject(classify_stock_error(e), UPDATE_FAILED_MESSAGE, respond_to);
            }
        };
        if stock.amount < amount {
            return self.reject(
                CartError::OutOfStock { requested: amount, available: stock.amount },
                UPDATE_FAILED_MESSAGE,
                respond_to,
            );
        }

        let mut next = self.cart.clone();
        next[index].amount = amount;
        self.commit(next);
        info!("Product amount updated");
        let _ = respond_to.send(Ok(()));
    }

    /// Swaps the rebuilt list in and writes the snapshot, as one unit.
    /// Failure paths return before reaching this point, so storage only ever
    /// sees committed carts. An encode or write failure is logged and the
    /// in-memory commit stands.
    fn commit(&mut self, next: Cart) {
        match snapshot::encode(&next) {
            Ok(raw) => self.store.write(CART_SNAPSHOT_KEY, &raw),
            Err(error) => error!(%error, "Cart snapshot not written"),
        }
        self.cart = next;
        debug!(items = self.cart.len(), "Cart committed");
    }

    /// Every failed mutation leaves through here: one notification with the
    /// user-facing message, then the typed error back to the caller.
    fn reject(&self, error: CartError, fallback: &'static str, respond_to: ServiceResponse<(), CartError>) {
        let message = user_message(&error, fallback);
        warn!(%error, user_message = message, "Rejecting cart mutation");
        self.notifier.notify(message);
        let _ = respond_to.send(Err(error));
    }
}

/// Out-of-stock keeps its specific message; every other kind falls back to
/// the operation's default.
fn user_message(error: &CartError, fallback: &'static str) -> &'static str {
    match error {
        CartError::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
        _ => fallback,
    }
}

fn classify_stock_error(error: StockError) -> CartError {
    match error {
        StockError::NotFound(id) => CartError::ProductNotFound(id),
        StockError::ActorCommunicationError(e) => CartError::ServiceUnavailable(e),
    }
}

fn classify_catalog_error(error: CatalogError) -> CartError {
    match error {
        CatalogError::NotFound(id) => CartError::ProductNotFound(id),
        CatalogError::ActorCommunicationError(e) => CartError::ServiceUnavailable(e),
    }
}
