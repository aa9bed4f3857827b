mod domain;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod backend;
mod cart;
mod checkout;
mod config;
mod guard;
mod messages;
mod notifications;
mod offers;
mod owner;
mod session;
mod storage;
mod watcher;

use std::time::Duration;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, ShopSystem};
use crate::config::ShopConfig;
use crate::domain::{partition_by_availability, Offer, OrderStatus};
use crate::guard::Access;
use crate::offers::OfferStore;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting tableside client against the in-process stand-in service");

    let mut config = ShopConfig::from_env();
    // Poll fast so the demo sees its new-order alert without a long wait.
    config.poll_interval = Duration::from_millis(500);
    let passcode = config.passcode.clone();

    let mut system = ShopSystem::start(config);

    // Owner signs in and stocks the menu.
    let desk = system.owner_desk();
    let span = tracing::info_span!("owner_setup");
    let (waffle, coffee) = async {
        info!("Logging in and seeding the menu");
        desk.login(passcode).await.map_err(|e| e.to_string())?;
        let waffle = desk
            .create_item("Classic Waffle", "Butter and maple syrup", 500, true)
            .await
            .map_err(|e| e.to_string())?;
        let coffee = desk
            .create_item("Flat White", "Double shot", 300, true)
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((waffle, coffee))
    }
    .instrument(span)
    .await?;

    match system.guard.check() {
        Access::Granted => info!("Owner pages unlocked"),
        Access::Denied { redirect } => {
            error!(redirect = redirect.path(), "Owner login did not stick")
        }
    }

    // A customer at table 4 browses the menu and orders.
    let span = tracing::info_span!("customer_order");
    let first_order = async {
        let menu = system
            .backend_client
            .get_menu_items()
            .await
            .map_err(|e| e.to_string())?;
        let (available, sold_out) = partition_by_availability(menu);
        info!(
            available = available.len(),
            sold_out = sold_out.len(),
            "Menu loaded"
        );

        system
            .cart_client
            .add_item(waffle.clone())
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .update_quantity(waffle.id.clone(), 2)
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .add_item(coffee.clone())
            .await
            .map_err(|e| e.to_string())?;

        system
            .checkout()
            .place_order("Ada", 4)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(order_id = %first_order.id, total = first_order.total, "First order placed");

    // Let the poller take its baseline on the first order, then place a
    // second one so the new-order alert fires.
    tokio::time::sleep(Duration::from_millis(700)).await;

    system
        .cart_client
        .add_item(waffle.clone())
        .await
        .map_err(|e| e.to_string())?;
    let second_order = system
        .checkout()
        .place_order("Grace", 2)
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %second_order.id, "Second order placed");

    match tokio::time::timeout(Duration::from_secs(5), system.notifications.alerts.recv()).await {
        Ok(Some(alert)) => info!(new_orders = alert.count, "New-order alert received"),
        Ok(None) => error!("Alert channel closed before the alert arrived"),
        Err(_) => error!("No alert within five seconds"),
    }
    info!(
        open_orders = *system.notifications.count.borrow(),
        "Order count after polling"
    );

    // The owner works the dashboard.
    let span = tracing::info_span!("owner_dashboard");
    async {
        let orders = desk
            .orders_for_dashboard()
            .await
            .map_err(|e| e.to_string())?;
        for order in &orders {
            info!(order_id = %order.id, status = %order.status, total = order.total, "Dashboard row");
        }
        desk.set_order_status(first_order.id.clone(), OrderStatus::Accepted)
            .await
            .map_err(|e| e.to_string())?;
        desk.set_order_status(first_order.id.clone(), OrderStatus::Completed)
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Offers live on this device; settings live with the service.
    system.offers.add(Offer::new(
        OfferStore::next_offer_id(),
        "Waffle Wednesday",
        "Every waffle, every Wednesday",
        "20% off",
    ));
    info!(offers = system.offers.offers().len(), "Offer published");

    desk.update_settings("Waffle Corner", None)
        .await
        .map_err(|e| e.to_string())?;
    let settings = desk.settings().await.map_err(|e| e.to_string())?;
    info!(shop_name = %settings.shop_name, "Settings saved");

    desk.logout();
    if let Access::Denied { redirect } = system.guard.check() {
        info!(redirect = redirect.path(), "Owner signed out");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
