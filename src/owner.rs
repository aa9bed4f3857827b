//! Owner desk: authentication and administration flows.
//!
//! Wraps the facade with the validation the owner screens need. Every
//! validation failure is raised before any service call; the service stays
//! the authority on everything it owns (order status outcomes, settings
//! storage, the passcode itself).

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::backend::{BackendClient, BackendError};
use crate::domain::{fresh_id, Logo, MenuItem, Order, OrderStatus, ShopSettings};
use crate::session::SessionStore;

/// Largest accepted logo upload.
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// Errors from the owner login flow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Passcode is required")]
    MissingPasscode,
    #[error("Invalid passcode")]
    InvalidPasscode,
    #[error("Authentication call failed: {0}")]
    Backend(#[from] BackendError),
}

/// Errors from menu administration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuAdminError {
    #[error("Item name is required")]
    MissingName,
    #[error("Price must be at least 1 minor unit")]
    InvalidPrice,
    #[error("Menu call failed: {0}")]
    Backend(#[from] BackendError),
}

/// Errors from the settings screen.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("Shop name is required")]
    MissingName,
    #[error("Logo must be 5 MiB or smaller, got {size} bytes")]
    LogoTooLarge { size: usize },
    #[error("Settings call failed: {0}")]
    Backend(#[from] BackendError),
}

/// The owner-facing flows: login, menu CRUD, order workflow, branding.
#[derive(Clone)]
pub struct OwnerDesk {
    backend: BackendClient,
    session: SessionStore,
}

impl OwnerDesk {
    pub fn new(backend: BackendClient, session: SessionStore) -> Self {
        Self { backend, session }
    }

    /// Logs the owner in. The passcode is consumed; after a rejection the
    /// caller starts over with an empty field. Callers the service already
    /// recognizes as admin skip the passcode comparison entirely.
    #[instrument(skip(self, passcode))]
    pub async fn login(&self, passcode: String) -> Result<(), AuthError> {
        if passcode.trim().is_empty() {
            error!("Validation failed: empty passcode");
            return Err(AuthError::MissingPasscode);
        }

        if self.backend.is_caller_admin().await? {
            info!("Caller already admin, session restored");
            self.session.set_authenticated();
            return Ok(());
        }

        if self.backend.authenticate_as_owner(passcode).await? {
            info!("Owner logged in");
            self.session.set_authenticated();
            Ok(())
        } else {
            warn!("Owner login rejected");
            Err(AuthError::InvalidPasscode)
        }
    }

    /// Drops the session flag. The service-side admin state is untouched.
    pub fn logout(&self) {
        info!("Owner logged out");
        self.session.clear();
    }

    /// Creates a menu item with a client-generated `item_<unix-millis>_<seq>` id.
    #[instrument(fields(price = price, available = available), skip(self, name, description))]
    pub async fn create_item(
        &self,
        name: &str,
        description: &str,
        price: u64,
        available: bool,
    ) -> Result<MenuItem, MenuAdminError> {
        let item = Self::validated_item(fresh_id("item"), name, description, price, available)?;
        self.backend.add_menu_item(item.clone()).await?;
        info!(item_id = %item.id, "Menu item created");
        Ok(item)
    }

    /// Updates an existing item, keeping its id.
    #[instrument(fields(item_id = %item_id), skip(self, item_id, name, description))]
    pub async fn update_item(
        &self,
        item_id: &str,
        name: &str,
        description: &str,
        price: u64,
        available: bool,
    ) -> Result<MenuItem, MenuAdminError> {
        let item = Self::validated_item(item_id.to_string(), name, description, price, available)?;
        self.backend.update_menu_item(item.clone()).await?;
        info!("Menu item updated");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: String) -> Result<(), MenuAdminError> {
        self.backend.delete_menu_item(item_id).await?;
        info!("Menu item deleted");
        Ok(())
    }

    fn validated_item(
        id: String,
        name: &str,
        description: &str,
        price: u64,
        available: bool,
    ) -> Result<MenuItem, MenuAdminError> {
        let name = name.trim();
        if name.is_empty() {
            error!("Validation failed: empty item name");
            return Err(MenuAdminError::MissingName);
        }
        if price == 0 {
            error!("Validation failed: zero price");
            return Err(MenuAdminError::InvalidPrice);
        }
        Ok(MenuItem {
            id,
            name: name.to_string(),
            description: description.trim().to_string(),
            available,
            price,
        })
    }

    /// Requests an order status transition; the service owns the outcome.
    #[instrument(skip(self))]
    pub async fn set_order_status(
        &self,
        order_id: String,
        status: OrderStatus,
    ) -> Result<(), BackendError> {
        self.backend.update_order_status(order_id, status).await
    }

    /// Orders for the dashboard, newest first by id sequence.
    #[instrument(skip(self))]
    pub async fn orders_for_dashboard(&self) -> Result<Vec<Order>, BackendError> {
        let mut orders = self.backend.get_orders().await?;
        orders.sort_by(|a, b| b.sequence_number().cmp(&a.sequence_number()));
        Ok(orders)
    }

    pub async fn settings(&self) -> Result<ShopSettings, BackendError> {
        self.backend.get_shop_settings().await
    }

    /// Saves shop branding. Oversized logos never leave the client.
    #[instrument(fields(has_logo = logo.is_some()), skip(self, shop_name, logo))]
    pub async fn update_settings(
        &self,
        shop_name: &str,
        logo: Option<Logo>,
    ) -> Result<(), SettingsError> {
        let shop_name = shop_name.trim();
        if shop_name.is_empty() {
            error!("Validation failed: empty shop name");
            return Err(SettingsError::MissingName);
        }
        if let Some(logo) = &logo {
            if logo.len() > MAX_LOGO_BYTES {
                error!(size = logo.len(), "Validation failed: logo too large");
                return Err(SettingsError::LogoTooLarge { size: logo.len() });
            }
        }

        self.backend
            .update_shop_settings(shop_name.to_string(), logo)
            .await?;
        info!("Shop settings saved");
        Ok(())
    }
}
