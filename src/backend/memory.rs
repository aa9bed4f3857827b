//! In-process stand-in for the remote service.
//!
//! Keeps menu, orders and settings in plain memory behind the same message
//! contract the real service would answer. Orders get sequential
//! `order_<n>` ids and a server-computed total at placement, matching what
//! the client core expects from the authoritative side.

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::backend::{BackendClient, BackendError};
use crate::domain::{Logo, MenuItem, Order, OrderItem, OrderStatus, ShopSettings};
use crate::messages::{BackendRequest, ServiceResponse};

/// Stand-in menu/order/settings service actor.
pub struct InMemoryBackend {
    receiver: mpsc::Receiver<BackendRequest>,
    menu_items: Vec<MenuItem>,
    orders: Vec<Order>,
    next_order: u64,
    settings: ShopSettings,
    passcode: String,
    caller_is_admin: bool,
}

impl InMemoryBackend {
    pub fn new(
        buffer_size: usize,
        passcode: impl Into<String>,
        shop_name: impl Into<String>,
    ) -> (Self, BackendClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            menu_items: Vec::new(),
            orders: Vec::new(),
            next_order: 1,
            settings: ShopSettings::named(shop_name),
            passcode: passcode.into(),
            caller_is_admin: false,
        };
        let client = BackendClient::new(sender);
        (service, client)
    }

    #[instrument(name = "backend_service", skip(self))]
    pub async fn run(mut self) {
        info!("InMemoryBackend starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BackendRequest::GetMenuItems { respond_to } => {
                    self.handle_get_menu_items(respond_to);
                }
                BackendRequest::AddMenuItem { item, respond_to } => {
                    self.handle_add_menu_item(item, respond_to);
                }
                BackendRequest::UpdateMenuItem { item, respond_to } => {
                    self.handle_update_menu_item(item, respond_to);
                }
                BackendRequest::DeleteMenuItem {
                    item_id,
                    respond_to,
                } => {
                    self.handle_delete_menu_item(item_id, respond_to);
                }
                BackendRequest::PlaceOrder {
                    customer_name,
                    table_number,
                    items,
                    respond_to,
                } => {
                    self.handle_place_order(customer_name, table_number, items, respond_to);
                }
                BackendRequest::GetOrders { respond_to } => {
                    self.handle_get_orders(respond_to);
                }
                BackendRequest::UpdateOrderStatus {
                    order_id,
                    status,
                    respond_to,
                } => {
                    self.handle_update_order_status(order_id, status, respond_to);
                }
                BackendRequest::GetShopSettings { respond_to } => {
                    self.handle_get_shop_settings(respond_to);
                }
                BackendRequest::UpdateShopSettings {
                    shop_name,
                    logo,
                    respond_to,
                } => {
                    self.handle_update_shop_settings(shop_name, logo, respond_to);
                }
                BackendRequest::AuthenticateAsOwner {
                    passcode,
                    respond_to,
                } => {
                    self.handle_authenticate_as_owner(passcode, respond_to);
                }
                BackendRequest::IsCallerAdmin { respond_to } => {
                    self.handle_is_caller_admin(respond_to);
                }
                BackendRequest::Shutdown => {
                    info!("InMemoryBackend shutting down");
                    break;
                }
            }
        }

        info!("InMemoryBackend stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_menu_items(&self, respond_to: ServiceResponse<Vec<MenuItem>, BackendError>) {
        debug!("Processing get_menu_items request");

        info!(item_count = self.menu_items.len(), "Menu listed");
        let _ = respond_to.send(Ok(self.menu_items.clone()));
    }

    #[instrument(fields(item_id = %item.id, item_name = %item.name), skip(self, item, respond_to))]
    fn handle_add_menu_item(
        &mut self,
        item: MenuItem,
        respond_to: ServiceResponse<(), BackendError>,
    ) {
        debug!("Processing add_menu_item request");

        match self.menu_items.iter_mut().find(|m| m.id == item.id) {
            Some(existing) => {
                *existing = item;
                info!("Menu item replaced");
            }
            None => {
                self.menu_items.push(item);
                info!(menu_size = self.menu_items.len(), "Menu item added");
            }
        }

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(item_id = %item.id), skip(self, item, respond_to))]
    fn handle_update_menu_item(
        &mut self,
        item: MenuItem,
        respond_to: ServiceResponse<(), BackendError>,
    ) {
        debug!("Processing update_menu_item request");

        let result = match self.menu_items.iter_mut().find(|m| m.id == item.id) {
            Some(existing) => {
                *existing = item;
                info!("Menu item updated");
                Ok(())
            }
            None => {
                error!("Menu item not found for update");
                Err(BackendError::MenuItemNotFound(item.id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(item_id = %item_id), skip(self, respond_to))]
    fn handle_delete_menu_item(
        &mut self,
        item_id: String,
        respond_to: ServiceResponse<(), BackendError>,
    ) {
        debug!("Processing delete_menu_item request");

        let before = self.menu_items.len();
        self.menu_items.retain(|m| m.id != item_id);
        if self.menu_items.len() == before {
            // deletes are idempotent; a second delete succeeds quietly
            debug!("Menu item already absent");
        } else {
            info!(menu_size = self.menu_items.len(), "Menu item deleted");
        }

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(
        fields(customer_name = %customer_name, table_number = table_number, line_count = items.len()),
        skip(self, items, respond_to)
    )]
    fn handle_place_order(
        &mut self,
        customer_name: String,
        table_number: u32,
        items: Vec<OrderItem>,
        respond_to: ServiceResponse<Order, BackendError>,
    ) {
        debug!("Processing place_order request");

        let total: u64 = items.iter().map(OrderItem::line_total).sum();
        let order = Order {
            id: format!("order_{}", self.next_order),
            customer_name,
            table_number,
            status: OrderStatus::New,
            total,
            items,
        };
        self.next_order += 1;
        self.orders.push(order.clone());

        info!(order_id = %order.id, total = order.total, "Order placed");
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_orders(&self, respond_to: ServiceResponse<Vec<Order>, BackendError>) {
        debug!("Processing get_orders request");

        debug!(order_count = self.orders.len(), "Orders listed");
        let _ = respond_to.send(Ok(self.orders.clone()));
    }

    #[instrument(fields(order_id = %order_id, status = %status), skip(self, respond_to))]
    fn handle_update_order_status(
        &mut self,
        order_id: String,
        status: OrderStatus,
        respond_to: ServiceResponse<(), BackendError>,
    ) {
        debug!("Processing update_order_status request");

        let result = match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                info!("Order status updated");
                Ok(())
            }
            None => {
                error!("Order not found for status update");
                Err(BackendError::OrderNotFound(order_id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_shop_settings(&self, respond_to: ServiceResponse<ShopSettings, BackendError>) {
        debug!("Processing get_shop_settings request");

        let _ = respond_to.send(Ok(self.settings.clone()));
    }

    #[instrument(fields(shop_name = %shop_name, has_logo = logo.is_some()), skip(self, logo, respond_to))]
    fn handle_update_shop_settings(
        &mut self,
        shop_name: String,
        logo: Option<Logo>,
        respond_to: ServiceResponse<(), BackendError>,
    ) {
        debug!("Processing update_shop_settings request");

        self.settings = ShopSettings { shop_name, logo };
        info!("Shop settings updated");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, passcode, respond_to))]
    fn handle_authenticate_as_owner(
        &mut self,
        passcode: String,
        respond_to: ServiceResponse<bool, BackendError>,
    ) {
        debug!("Processing authenticate_as_owner request");

        let authenticated = passcode == self.passcode;
        if authenticated {
            self.caller_is_admin = true;
            info!("Owner authenticated");
        } else {
            warn!("Owner authentication rejected");
        }

        let _ = respond_to.send(Ok(authenticated));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_is_caller_admin(&self, respond_to: ServiceResponse<bool, BackendError>) {
        debug!("Processing is_caller_admin request");

        let _ = respond_to.send(Ok(self.caller_is_admin));
    }
}
