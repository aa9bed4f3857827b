use std::fmt;

use crate::domain::menu::MenuItem;

/// Lifecycle of an order as tracked by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    New,
    Accepted,
    Completed,
}

impl OrderStatus {
    /// Wire name used by the remote service.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Completed => "completed",
        }
    }

    /// Label shown to the owner; an accepted order reads as "Preparing" on
    /// the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Accepted => "Preparing",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ordered dish: the menu item as it looked at order time, plus quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
}

impl OrderItem {
    /// Line total in minor units, integer arithmetic only.
    pub fn line_total(&self) -> u64 {
        self.menu_item.price * u64::from(self.quantity)
    }
}

/// A placed table order.
///
/// Created and mutated only by the remote service; this client reads order
/// lists and requests status transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub table_number: u32,
    pub status: OrderStatus,
    pub total: u64,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Numeric suffix of an `order_<n>` id. The owner dashboard sorts by it
    /// newest-first; ids without a numeric suffix sort as oldest.
    pub fn sequence_number(&self) -> u64 {
        self.id
            .split('_')
            .nth(1)
            .and_then(|suffix| suffix.parse().ok())
            .unwrap_or(0)
    }
}
