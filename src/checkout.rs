//! Customer checkout flow.
//!
//! Validates the order form, snapshots the cart, hands the lines to the
//! remote service and clears the cart once placement succeeds. Validation
//! failures never generate service traffic, and a failed placement leaves
//! the cart intact so the customer can retry.

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::backend::{BackendClient, BackendError};
use crate::cart::{CartClient, CartError};
use crate::domain::{Order, OrderItem};

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Customer name is required")]
    MissingCustomerName,
    #[error("Table number must be at least 1")]
    InvalidTableNumber,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Cart unavailable: {0}")]
    Cart(#[from] CartError),
    #[error("Order placement failed: {0}")]
    Backend(#[from] BackendError),
}

/// Order placement orchestrator for the customer side.
#[derive(Clone)]
pub struct Checkout {
    cart: CartClient,
    backend: BackendClient,
}

impl Checkout {
    pub fn new(cart: CartClient, backend: BackendClient) -> Self {
        Self { cart, backend }
    }

    /// Places a table order from the current cart.
    ///
    /// The name is trimmed before validation; the placed order carries the
    /// trimmed form. The cart is cleared only after the service confirms
    /// placement.
    #[instrument(fields(table_number = table_number), skip(self, customer_name))]
    pub async fn place_order(
        &self,
        customer_name: &str,
        table_number: u32,
    ) -> Result<Order, CheckoutError> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            error!("Validation failed: empty customer name");
            return Err(CheckoutError::MissingCustomerName);
        }
        if table_number == 0 {
            error!("Validation failed: table number 0");
            return Err(CheckoutError::InvalidTableNumber);
        }

        let snapshot = self.cart.snapshot().await?;
        if snapshot.is_empty() {
            error!("Validation failed: empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let items: Vec<OrderItem> = snapshot
            .lines
            .into_iter()
            .map(|line| OrderItem {
                menu_item: line.item,
                quantity: line.quantity,
            })
            .collect();

        let order = self
            .backend
            .place_order(customer_name.to_string(), table_number, items)
            .await?;

        info!(order_id = %order.id, total = order.total, "Order placed, clearing cart");
        if let Err(e) = self.cart.clear().await {
            warn!(error = %e, "Order placed but the cart could not be cleared");
        }

        Ok(order)
    }
}
