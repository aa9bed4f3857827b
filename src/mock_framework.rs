//! # Mock Framework
//!
//! Utilities for testing flows in isolation.
//!
//! Instead of spinning up a full service actor, a mock client sends its
//! requests to a channel the test controls. The test inspects each request
//! with an `expect_*` helper, asserts the parameters, and scripts the
//! service side by answering through the captured responder. This also
//! makes "no traffic happened" assertions direct: the receiver stays empty.

use tokio::sync::mpsc;

use crate::backend::{BackendClient, BackendError};
use crate::cart::{CartClient, CartError, CartSnapshot};
use crate::domain::{MenuItem, Order, OrderItem};
use crate::messages::{BackendRequest, CartRequest, ServiceResponse};

/// Creates a cart client plus the receiver the test scripts.
pub fn create_mock_cart(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(sender), receiver)
}

/// Creates a backend client plus the receiver the test scripts.
pub fn create_mock_backend(buffer_size: usize) -> (BackendClient, mpsc::Receiver<BackendRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (BackendClient::new(sender), receiver)
}

/// Helper to verify that the next cart message is an AddItem request
pub async fn expect_add_item(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(MenuItem, ServiceResponse<(), CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::AddItem { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next cart message is a Snapshot request
pub async fn expect_snapshot(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<ServiceResponse<CartSnapshot, CartError>> {
    match receiver.recv().await {
        Some(CartRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next cart message is a Clear request
pub async fn expect_clear(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<ServiceResponse<(), CartError>> {
    match receiver.recv().await {
        Some(CartRequest::Clear { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next backend message is a PlaceOrder request
pub async fn expect_place_order(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(String, u32, Vec<OrderItem>, ServiceResponse<Order, BackendError>)> {
    match receiver.recv().await {
        Some(BackendRequest::PlaceOrder {
            customer_name,
            table_number,
            items,
            respond_to,
        }) => Some((customer_name, table_number, items, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next backend message is an IsCallerAdmin request
pub async fn expect_is_caller_admin(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<ServiceResponse<bool, BackendError>> {
    match receiver.recv().await {
        Some(BackendRequest::IsCallerAdmin { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next backend message is an AuthenticateAsOwner request
pub async fn expect_authenticate(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(String, ServiceResponse<bool, BackendError>)> {
    match receiver.recv().await {
        Some(BackendRequest::AuthenticateAsOwner {
            passcode,
            respond_to,
        }) => Some((passcode, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_cart_scripts_the_service_side() {
        let (client, mut receiver) = create_mock_cart(10);

        let add_task = tokio::spawn(async move {
            client
                .add_item(MenuItem::new("item_1", "Classic Waffle", "", 500))
                .await
        });

        let (item, responder) = expect_add_item(&mut receiver)
            .await
            .expect("Expected AddItem request");
        assert_eq!(item.id, "item_1");
        responder.send(Ok(())).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result, Ok(()));
    }
}
