//! # Mock Framework
//!
//! Utilities for testing the cart service in isolation.
//!
//! The shop collaborators are mocked as channels the test controls: the cart
//! service sends real requests, the test inspects them with helpers like
//! [`expect_get_stock`] and responds deterministically. The notifier is
//! mocked as a recording sink so tests can assert exactly which messages a
//! user would have seen.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use crate::clients::{CatalogClient, StockClient};
use crate::domain::{Product, ProductId, StockInfo};
use crate::error::{CatalogError, StockError};
use crate::messages::{CatalogRequest, ServiceResponse, StockRequest};
use crate::notify::Notifier;

/// Creates a mock stock client and a receiver for asserting requests.
pub fn create_mock_stock_client(buffer_size: usize) -> (StockClient, mpsc::Receiver<StockRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StockClient::new(sender), receiver)
}

/// Creates a mock catalog client and a receiver for asserting requests.
pub fn create_mock_catalog_client(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetStock request
pub async fn expect_get_stock(
    receiver: &mut mpsc::Receiver<StockRequest>,
) -> Option<(ProductId, ServiceResponse<StockInfo, StockError>)> {
    match receiver.recv().await {
        Some(StockRequest::GetStock { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetProduct request
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, ServiceResponse<Product, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Notifier that records every message for later assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_stock_client() {
        let (client, mut receiver) = create_mock_stock_client(10);

        let stock_task = tokio::spawn(async move { client.get_stock(7).await });

        let (id, responder) = expect_get_stock(&mut receiver).await.expect("Expected GetStock request");
        assert_eq!(id, 7);
        responder.send(Ok(StockInfo::new(7, 3))).unwrap();

        let result = stock_task.await.unwrap();
        assert_eq!(result, Ok(StockInfo::new(7, 3)));
    }

    #[tokio::test]
    async fn test_dropped_responder_surfaces_communication_error() {
        let (client, mut receiver) = create_mock_catalog_client(10);

        let catalog_task = tokio::spawn(async move { client.get_product(7).await });

        let (_, responder) = expect_get_product(&mut receiver).await.expect("Expected GetProduct request");
        drop(responder);

        let result = catalog_task.await.unwrap();
        assert!(matches!(result, Err(CatalogError::ActorCommunicationError(_))));
    }
}
