/// A dish on the shop's menu.
///
/// Owned by the remote service; the cart and placed orders hold snapshots
/// taken at selection time, so later menu edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub available: bool,
    /// Price in minor currency units (cents). Money stays integer end to end.
    pub price: u64,
}

impl MenuItem {
    /// Creates an available menu item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            available: true,
            price,
        }
    }
}

/// Split a menu into `(available, unavailable)` sections, each preserving
/// menu order. The customer view lists the unavailable dishes separately.
pub fn partition_by_availability(items: Vec<MenuItem>) -> (Vec<MenuItem>, Vec<MenuItem>) {
    items.into_iter().partition(|item| item.available)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_keeps_menu_order_within_sections() {
        let mut sold_out = MenuItem::new("item_2", "Berry Stack", "", 650);
        sold_out.available = false;

        let menu = vec![
            MenuItem::new("item_1", "Classic Waffle", "", 500),
            sold_out.clone(),
            MenuItem::new("item_3", "Choco Waffle", "", 550),
        ];

        let (available, unavailable) = partition_by_availability(menu);
        let available_ids: Vec<&str> = available.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(available_ids, ["item_1", "item_3"]);
        assert_eq!(unavailable, vec![sold_out]);
    }
}
