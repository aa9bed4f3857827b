//! Remote service facade.
//!
//! The core reaches menu, order and settings data only through
//! `BackendClient` and the typed request contract in `messages`. The
//! `memory` module hosts the in-process stand-in service used by the demo
//! binary and the test suite; a deployment would connect the same client to
//! a real transport.

pub mod memory;

pub use memory::InMemoryBackend;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{Logo, MenuItem, Order, OrderItem, OrderStatus, ShopSettings};
use crate::messages::BackendRequest;

/// Errors surfaced by remote service calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("Remote service unreachable: {0}")]
    Unreachable(String),
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),
}

/// Generate client methods with oneshot channel boilerplate and automatic
/// tracing. Channel loss surfaces as `BackendError::Unreachable`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, BackendError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|e| BackendError::Unreachable(e.to_string()))?;

                response
                    .await
                    .map_err(|e| BackendError::Unreachable(e.to_string()))?
            }
        }
    };
}

/// Client for the remote service. Thin wrapper around the message channel;
/// clones share the same connection.
#[derive(Clone)]
pub struct BackendClient {
    sender: mpsc::Sender<BackendRequest>,
}

impl BackendClient {
    pub fn new(sender: mpsc::Sender<BackendRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), BackendError> {
        debug!("Sending shutdown request");
        self.sender
            .send(BackendRequest::Shutdown)
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        Ok(())
    }
}

client_method!(BackendClient => fn get_menu_items() -> Vec<MenuItem> as BackendRequest::GetMenuItems);
client_method!(BackendClient => fn add_menu_item(item: MenuItem) -> () as BackendRequest::AddMenuItem);
client_method!(BackendClient => fn update_menu_item(item: MenuItem) -> () as BackendRequest::UpdateMenuItem);
client_method!(BackendClient => fn delete_menu_item(item_id: String) -> () as BackendRequest::DeleteMenuItem);
client_method!(BackendClient => fn place_order(customer_name: String, table_number: u32, items: Vec<OrderItem>) -> Order as BackendRequest::PlaceOrder);
client_method!(BackendClient => fn get_orders() -> Vec<Order> as BackendRequest::GetOrders);
client_method!(BackendClient => fn update_order_status(order_id: String, status: OrderStatus) -> () as BackendRequest::UpdateOrderStatus);
client_method!(BackendClient => fn get_shop_settings() -> ShopSettings as BackendRequest::GetShopSettings);
client_method!(BackendClient => fn update_shop_settings(shop_name: String, logo: Option<Logo>) -> () as BackendRequest::UpdateShopSettings);
client_method!(BackendClient => fn authenticate_as_owner(passcode: String) -> bool as BackendRequest::AuthenticateAsOwner);
client_method!(BackendClient => fn is_caller_admin() -> bool as BackendRequest::IsCallerAdmin);
