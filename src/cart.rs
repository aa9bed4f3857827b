//! Cart engine: the reducer behind the customer's order building.
//!
//! `Cart` is a pure in-memory reducer, testable without a runtime.
//! `CartService` owns one `Cart` and serializes every mutation through its
//! message loop, so derived totals always reflect a single consistent line
//! sequence. `CartClient` is the cheap clonable handle handed to flows. The
//! cart is deliberately not persisted: an abandoned cart is simply gone.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument};

use crate::domain::MenuItem;
use crate::messages::{CartRequest, ServiceResponse};

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be at least 1; remove the item instead")]
    InvalidQuantity,
    #[error("Cart service unavailable: {0}")]
    ChannelClosed(String),
}

/// One cart line: a menu item snapshot and how many the customer wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// Line total in minor currency units.
    pub fn line_total(&self) -> u64 {
        self.item.price * u64::from(self.quantity)
    }
}

/// Immutable cart view handed across the service boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: u64,
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pure in-memory cart reducer.
///
/// Lines keep insertion order and stay unique per item id; a stored quantity
/// never drops below 1 (dropping a line goes through `remove_item`). Totals
/// are recomputed from the lines on every read, never cached, and use u64
/// minor-unit arithmetic throughout.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one of `item`: an existing line increments its quantity, a new
    /// item appends a line with quantity 1. Never fails; a line already at
    /// `u32::MAX` stays there.
    pub fn add_item(&mut self, item: MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine { item, quantity: 1 }),
        }
    }

    /// Sets a line's quantity outright (absolute, not a delta). Zero is
    /// rejected so a line can never linger at quantity 0. Unknown ids are
    /// ignored.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Drops the line for `item_id`; absent ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        self.lines.retain(|line| line.item.id != item_id);
    }

    /// Empties the cart. Called after a successful order placement.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Cart total in minor currency units.
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of items across all lines; the sum saturates at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .map(|line| line.quantity)
            .fold(0u32, u32::saturating_add)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

/// Cart actor owning the single mutable `Cart` for the session.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart: Cart::new(),
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { item, respond_to } => {
                    self.handle_add_item(item, respond_to);
                }
                CartRequest::UpdateQuantity {
                    item_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_update_quantity(item_id, quantity, respond_to);
                }
                CartRequest::RemoveItem {
                    item_id,
                    respond_to,
                } => {
                    self.handle_remove_item(item_id, respond_to);
                }
                CartRequest::Clear { respond_to } => {
                    self.handle_clear(respond_to);
                }
                CartRequest::Snapshot { respond_to } => {
                    self.handle_snapshot(respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(item_id = %item.id, item_name = %item.name), skip(self, item, respond_to))]
    fn handle_add_item(&mut self, item: MenuItem, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add_item request");

        self.cart.add_item(item);
        info!(
            item_count = self.cart.item_count(),
            total = self.cart.total(),
            "Item added to cart"
        );

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(item_id = %item_id, quantity = quantity), skip(self, respond_to))]
    fn handle_update_quantity(
        &mut self,
        item_id: String,
        quantity: u32,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing update_quantity request");

        let result = self.cart.update_quantity(&item_id, quantity);
        match &result {
            Ok(()) => info!(total = self.cart.total(), "Quantity updated"),
            Err(e) => error!(error = %e, "Quantity update rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(item_id = %item_id), skip(self, respond_to))]
    fn handle_remove_item(&mut self, item_id: String, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove_item request");

        self.cart.remove_item(&item_id);
        info!(line_count = self.cart.lines().len(), "Item removed from cart");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear(&mut self, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing clear request");

        self.cart.clear();
        info!("Cart cleared");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_snapshot(&self, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        debug!("Processing snapshot request");

        let snapshot = self.cart.snapshot();
        debug!(
            item_count = snapshot.item_count,
            total = snapshot.total,
            "Snapshot taken"
        );

        let _ = respond_to.send(Ok(snapshot));
    }
}

/// Client for the cart actor. Thin wrapper around the message channel.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(fields(item_id = %item.id), skip(self, item))]
    pub async fn add_item(&self, item: MenuItem) -> Result<(), CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::AddItem { item, respond_to })
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?;

        response
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(&self, item_id: String, quantity: u32) -> Result<(), CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::UpdateQuantity {
                item_id,
                quantity,
                respond_to,
            })
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?;

        response
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: String) -> Result<(), CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::RemoveItem {
                item_id,
                respond_to,
            })
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?;

        response
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::Clear { respond_to })
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?;

        response
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::Snapshot { respond_to })
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?;

        response
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ChannelClosed(e.to_string()))?;
        Ok(())
    }
}
