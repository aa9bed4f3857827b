//! Polling service that feeds the order watcher.
//!
//! Owns an `OrderWatcher`, polls the remote service on a fixed interval and
//! publishes the results: a watch channel with the live new-order count and
//! an mpsc channel carrying one-shot alerts. A failed poll is logged and
//! skipped; the next tick retries naturally. Alerts nobody consumes in time
//! are dropped rather than stalling the poller.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time;
use tracing::{debug, info, instrument, warn};

use crate::backend::BackendClient;
use crate::session::SessionStore;
use crate::watcher::{NewOrderAlert, OrderWatcher};

/// Consumer side of the notification stream.
pub struct NotificationFeed {
    /// One-shot "new orders arrived" alerts, cooldown-limited.
    pub alerts: mpsc::Receiver<NewOrderAlert>,
    /// Live count of orders in status `New`; starts at 0.
    pub count: watch::Receiver<usize>,
}

/// Handle that ends the polling loop.
pub struct NotificationStop {
    sender: oneshot::Sender<()>,
}

impl NotificationStop {
    /// Signals the poller to end after the current tick.
    pub fn stop(self) {
        let _ = self.sender.send(());
    }
}

/// Timer-driven poller around the pure watcher.
pub struct NotificationService {
    backend: BackendClient,
    session: SessionStore,
    watcher: OrderWatcher,
    poll_interval: Duration,
    alerts: mpsc::Sender<NewOrderAlert>,
    count: watch::Sender<usize>,
    stop: oneshot::Receiver<()>,
}

impl NotificationService {
    pub fn new(
        backend: BackendClient,
        session: SessionStore,
        poll_interval: Duration,
        alert_cooldown: Duration,
        alert_buffer: usize,
    ) -> (Self, NotificationFeed, NotificationStop) {
        let (alert_tx, alert_rx) = mpsc::channel(alert_buffer);
        let (count_tx, count_rx) = watch::channel(0);
        let (stop_tx, stop_rx) = oneshot::channel();

        let service = Self {
            backend,
            session,
            watcher: OrderWatcher::new(alert_cooldown),
            poll_interval,
            alerts: alert_tx,
            count: count_tx,
            stop: stop_rx,
        };
        let feed = NotificationFeed {
            alerts: alert_rx,
            count: count_rx,
        };
        let stop = NotificationStop { sender: stop_tx };

        (service, feed, stop)
    }

    #[instrument(name = "notification_service", skip(self))]
    pub async fn run(mut self) {
        info!(poll_interval_ms = self.poll_interval.as_millis() as u64, "NotificationService starting");

        let mut ticker = time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = &mut self.stop => {
                    info!("NotificationService stopping");
                    break;
                }
                _ = ticker.tick() => {
                    self.poll().await;
                }
            }
        }

        info!("NotificationService stopped");
    }

    async fn poll(&mut self) {
        let authenticated = self.session.is_authenticated();
        let orders = match self.backend.get_orders().await {
            Ok(orders) => orders,
            Err(e) => {
                warn!(error = %e, "Order poll failed, retrying on the next tick");
                return;
            }
        };

        let observation = self.watcher.observe(authenticated, &orders);
        self.count.send_replace(observation.new_order_count);

        if let Some(alert) = observation.alert {
            info!(new_orders = alert.count, "New orders arrived");
            if let Err(e) = self.alerts.try_send(alert) {
                debug!(error = %e, "Alert dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::domain::{MenuItem, OrderItem};
    use crate::storage::MemoryStorage;
    use std::sync::Arc;
    use tokio::time::timeout;

    const POLL: Duration = Duration::from_millis(10);
    const COOLDOWN: Duration = Duration::from_secs(60);
    const WAIT: Duration = Duration::from_secs(5);

    fn order_items() -> Vec<OrderItem> {
        vec![OrderItem {
            menu_item: MenuItem::new("item_1", "Classic Waffle", "", 500),
            quantity: 1,
        }]
    }

    async fn wait_for_count(count: &mut watch::Receiver<usize>, expected: usize) {
        timeout(WAIT, async {
            loop {
                if *count.borrow_and_update() == expected {
                    break;
                }
                count.changed().await.unwrap();
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn baseline_is_silent_then_new_orders_alert_once() {
        let (backend_service, backend) = InMemoryBackend::new(8, "pass", "Waffle Corner");
        let backend_handle = tokio::spawn(backend_service.run());

        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        session.set_authenticated();

        backend
            .place_order("Ada".to_string(), 1, order_items())
            .await
            .unwrap();

        let (service, mut feed, stop) =
            NotificationService::new(backend.clone(), session, POLL, COOLDOWN, 4);
        let poller = tokio::spawn(service.run());

        // the pre-existing order baselines silently
        wait_for_count(&mut feed.count, 1).await;
        assert!(feed.alerts.try_recv().is_err());

        backend
            .place_order("Grace".to_string(), 2, order_items())
            .await
            .unwrap();

        wait_for_count(&mut feed.count, 2).await;
        let alert = timeout(WAIT, feed.alerts.recv()).await.unwrap().unwrap();
        assert_eq!(alert.count, 1);

        // within the cooldown another arrival moves the count but stays quiet
        backend
            .place_order("Edsger".to_string(), 3, order_items())
            .await
            .unwrap();
        wait_for_count(&mut feed.count, 3).await;
        assert!(feed.alerts.try_recv().is_err());

        stop.stop();
        poller.await.unwrap();
        backend.shutdown().await.unwrap();
        backend_handle.await.unwrap();
    }

    #[tokio::test]
    async fn unauthenticated_sessions_see_zero_and_no_alerts() {
        let (backend_service, backend) = InMemoryBackend::new(8, "pass", "Waffle Corner");
        let backend_handle = tokio::spawn(backend_service.run());

        let session = SessionStore::new(Arc::new(MemoryStorage::new()));

        backend
            .place_order("Ada".to_string(), 1, order_items())
            .await
            .unwrap();

        let (service, mut feed, stop) =
            NotificationService::new(backend.clone(), session, POLL, COOLDOWN, 4);
        let poller = tokio::spawn(service.run());

        // let a few polls happen: every tick republishes the count
        for _ in 0..3 {
            timeout(WAIT, feed.count.changed()).await.unwrap().unwrap();
        }
        assert_eq!(*feed.count.borrow(), 0);
        assert!(feed.alerts.try_recv().is_err());

        stop.stop();
        poller.await.unwrap();
        backend.shutdown().await.unwrap();
        backend_handle.await.unwrap();
    }

    #[tokio::test]
    async fn stop_ends_the_polling_task() {
        let (backend_service, backend) = InMemoryBackend::new(8, "pass", "Waffle Corner");
        let backend_handle = tokio::spawn(backend_service.run());
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));

        let (service, _feed, stop) =
            NotificationService::new(backend.clone(), session, POLL, COOLDOWN, 4);
        let poller = tokio::spawn(service.run());

        stop.stop();
        timeout(WAIT, poller).await.unwrap().unwrap();

        backend.shutdown().await.unwrap();
        backend_handle.await.unwrap();
    }
}
