//! Typed message enums for service communication. Each variant carries its
//! parameters and a oneshot channel for the response.

use tokio::sync::oneshot;

use crate::backend::BackendError;
use crate::cart::{CartError, CartSnapshot};
use crate::domain::{Logo, MenuItem, Order, OrderItem, OrderStatus, ShopSettings};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        item: MenuItem,
        respond_to: ServiceResponse<(), CartError>,
    },
    UpdateQuantity {
        item_id: String,
        quantity: u32,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveItem {
        item_id: String,
        respond_to: ServiceResponse<(), CartError>,
    },
    Clear {
        respond_to: ServiceResponse<(), CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Shutdown,
}

/// The remote service contract. The client side of this enum is the only
/// path the core uses to reach menu, order and settings data.
#[derive(Debug)]
pub enum BackendRequest {
    GetMenuItems {
        respond_to: ServiceResponse<Vec<MenuItem>, BackendError>,
    },
    AddMenuItem {
        item: MenuItem,
        respond_to: ServiceResponse<(), BackendError>,
    },
    UpdateMenuItem {
        item: MenuItem,
        respond_to: ServiceResponse<(), BackendError>,
    },
    DeleteMenuItem {
        item_id: String,
        respond_to: ServiceResponse<(), BackendError>,
    },
    PlaceOrder {
        customer_name: String,
        table_number: u32,
        items: Vec<OrderItem>,
        respond_to: ServiceResponse<Order, BackendError>,
    },
    GetOrders {
        respond_to: ServiceResponse<Vec<Order>, BackendError>,
    },
    UpdateOrderStatus {
        order_id: String,
        status: OrderStatus,
        respond_to: ServiceResponse<(), BackendError>,
    },
    GetShopSettings {
        respond_to: ServiceResponse<ShopSettings, BackendError>,
    },
    UpdateShopSettings {
        shop_name: String,
        logo: Option<Logo>,
        respond_to: ServiceResponse<(), BackendError>,
    },
    AuthenticateAsOwner {
        passcode: String,
        respond_to: ServiceResponse<bool, BackendError>,
    },
    IsCallerAdmin {
        respond_to: ServiceResponse<bool, BackendError>,
    },
    Shutdown,
}
