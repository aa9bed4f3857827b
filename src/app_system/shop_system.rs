//! The main application system that orchestrates the client core.
//!
//! Responsible for starting the services, wiring stores and flows together,
//! and shutting everything down in order.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::backend::{BackendClient, InMemoryBackend};
use crate::cart::{CartClient, CartService};
use crate::checkout::Checkout;
use crate::config::ShopConfig;
use crate::guard::OwnerGuard;
use crate::notifications::{NotificationFeed, NotificationService, NotificationStop};
use crate::offers::OfferStore;
use crate::owner::OwnerDesk;
use crate::session::SessionStore;
use crate::storage::{JsonFileStorage, MemoryStorage, StorageBackend};

pub struct ShopSystem {
    pub cart_client: CartClient,
    pub backend_client: BackendClient,
    pub session: SessionStore,
    pub guard: OwnerGuard,
    pub offers: OfferStore,
    pub notifications: NotificationFeed,
    notification_stop: NotificationStop,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Starts the full client system against the in-process stand-in
    /// service. Must run inside a tokio runtime.
    pub fn start(config: ShopConfig) -> Self {
        let (backend_service, backend_client) = InMemoryBackend::new(
            config.channel_capacity,
            &config.passcode,
            &config.shop_name,
        );
        let backend_handle = tokio::spawn(backend_service.run());

        let mut system = Self::start_with_backend(&config, backend_client);
        system.handles.push(backend_handle);
        system
    }

    /// Wires the client core around an already-connected service client.
    pub fn start_with_backend(config: &ShopConfig, backend_client: BackendClient) -> Self {
        info!("Starting shop system");

        let session_storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let durable_storage: Arc<dyn StorageBackend> =
            Arc::new(JsonFileStorage::new(&config.data_dir));

        let session = SessionStore::new(session_storage);
        let guard = OwnerGuard::new(session.clone());
        let offers = OfferStore::load(durable_storage);

        let (cart_service, cart_client) = CartService::new(config.channel_capacity);
        let cart_handle = tokio::spawn(cart_service.run());

        let (notification_service, notifications, notification_stop) = NotificationService::new(
            backend_client.clone(),
            session.clone(),
            config.poll_interval,
            config.alert_cooldown,
            config.alert_buffer,
        );
        let notification_handle = tokio::spawn(notification_service.run());

        info!("Shop system started");

        Self {
            cart_client,
            backend_client,
            session,
            guard,
            offers,
            notifications,
            notification_stop,
            handles: vec![cart_handle, notification_handle],
        }
    }

    /// Checkout flow wired to this system's cart and service.
    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.cart_client.clone(), self.backend_client.clone())
    }

    /// Owner flows wired to this system's service and session.
    pub fn owner_desk(&self) -> OwnerDesk {
        OwnerDesk::new(self.backend_client.clone(), self.session.clone())
    }

    /// Gracefully shuts down the whole system: the poller first, then the
    /// actor services, then waits for every task to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system");

        self.notification_stop.stop();
        let _ = self.cart_client.shutdown().await;
        let _ = self.backend_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Shop system shutdown complete");
        Ok(())
    }
}
