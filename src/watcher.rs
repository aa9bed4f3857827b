//! Order notification watcher.
//!
//! A pure state machine over successive snapshots of the remote order list.
//! The watcher owns the ids seen in the previous observation plus an alert
//! cooldown; time is injected, so the whole machine tests without timers.
//! The polling loop that feeds it lives in `notifications`.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::domain::{Order, OrderStatus};

/// Id-set difference between two successive order list snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderDelta {
    pub new: HashSet<String>,
    pub removed: HashSet<String>,
}

/// Pure id-set diff of two snapshots.
pub fn diff(previous: &HashSet<String>, current: &HashSet<String>) -> OrderDelta {
    OrderDelta {
        new: current.difference(previous).cloned().collect(),
        removed: previous.difference(current).cloned().collect(),
    }
}

/// One-shot "new orders arrived" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderAlert {
    /// How many new orders arrived since the previous observation.
    pub count: usize,
}

/// Outcome of one observation of the polled order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Orders currently in status `New`. Recomputed on every observation and
    /// unaffected by alert suppression.
    pub new_order_count: usize,
    pub alert: Option<NewOrderAlert>,
}

/// Watcher state: the order ids seen in the previous authenticated
/// observation and the timestamp of the last fired alert.
#[derive(Debug)]
pub struct OrderWatcher {
    previous_seen: HashSet<String>,
    last_alert_at: Option<Instant>,
    alert_cooldown: Duration,
}

impl OrderWatcher {
    pub fn new(alert_cooldown: Duration) -> Self {
        Self {
            previous_seen: HashSet::new(),
            last_alert_at: None,
            alert_cooldown,
        }
    }

    /// Observes the current order list using the wall clock.
    pub fn observe(&mut self, authenticated: bool, orders: &[Order]) -> Observation {
        self.observe_at(Instant::now(), authenticated, orders)
    }

    /// Observes the current order list at an injected point in time.
    ///
    /// Unauthenticated observations are inert: count 0, no alert, and the
    /// seen-id state stays untouched so a later authenticated observation
    /// baselines cleanly. The first authenticated look at a non-empty list
    /// records a baseline without alerting, preventing a burst for orders
    /// that were already there. After that, newly seen `New` orders fire at
    /// most one alert per cooldown window, while `new_order_count` always
    /// reflects the current list.
    pub fn observe_at(
        &mut self,
        now: Instant,
        authenticated: bool,
        orders: &[Order],
    ) -> Observation {
        if !authenticated {
            return Observation {
                new_order_count: 0,
                alert: None,
            };
        }

        let current_ids: HashSet<String> = orders.iter().map(|o| o.id.clone()).collect();
        let new_order_count = orders
            .iter()
            .filter(|o| o.status == OrderStatus::New)
            .count();

        let alert = if self.previous_seen.is_empty() {
            None
        } else {
            let delta = diff(&self.previous_seen, &current_ids);
            let newly_seen = orders
                .iter()
                .filter(|o| o.status == OrderStatus::New && delta.new.contains(&o.id))
                .count();

            if newly_seen > 0 && self.cooldown_elapsed(now) {
                self.last_alert_at = Some(now);
                Some(NewOrderAlert { count: newly_seen })
            } else {
                None
            }
        };

        self.previous_seen = current_ids;

        Observation {
            new_order_count,
            alert,
        }
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_alert_at {
            None => true,
            Some(at) => now.duration_since(at) >= self.alert_cooldown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(15);

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            customer_name: "Ada".to_string(),
            table_number: 1,
            status,
            total: 0,
            items: Vec::new(),
        }
    }

    fn new_order(id: &str) -> Order {
        order(id, OrderStatus::New)
    }

    #[test]
    fn diff_reports_new_and_removed_ids() {
        let previous: HashSet<String> = ["order_1", "order_2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let current: HashSet<String> = ["order_2", "order_3"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let delta = diff(&previous, &current);
        assert!(delta.new.contains("order_3"));
        assert!(delta.removed.contains("order_1"));
        assert_eq!(delta.new.len(), 1);
        assert_eq!(delta.removed.len(), 1);
    }

    #[test]
    fn baseline_then_alert_then_cooldown_suppression() {
        let mut watcher = OrderWatcher::new(COOLDOWN);
        let t0 = Instant::now();

        // first observation is a baseline: counted, never alerted
        let first = watcher.observe_at(t0, true, &[new_order("order_1"), new_order("order_2")]);
        assert_eq!(first.new_order_count, 2);
        assert_eq!(first.alert, None);

        // a third order arrives: exactly one alert
        let second = watcher.observe_at(
            t0 + Duration::from_secs(5),
            true,
            &[
                new_order("order_1"),
                new_order("order_2"),
                new_order("order_3"),
            ],
        );
        assert_eq!(second.new_order_count, 3);
        assert_eq!(second.alert, Some(NewOrderAlert { count: 1 }));

        // a fourth arrives within the cooldown: count moves, no repeat alert
        let third = watcher.observe_at(
            t0 + Duration::from_secs(10),
            true,
            &[
                new_order("order_1"),
                new_order("order_2"),
                new_order("order_3"),
                new_order("order_4"),
            ],
        );
        assert_eq!(third.new_order_count, 4);
        assert_eq!(third.alert, None);
    }

    #[test]
    fn cooldown_expiry_re_arms_the_alert() {
        let mut watcher = OrderWatcher::new(COOLDOWN);
        let t0 = Instant::now();

        watcher.observe_at(t0, true, &[new_order("order_1")]);
        let alerted = watcher.observe_at(
            t0 + Duration::from_secs(5),
            true,
            &[new_order("order_1"), new_order("order_2")],
        );
        assert!(alerted.alert.is_some());

        let again = watcher.observe_at(
            t0 + Duration::from_secs(5) + COOLDOWN,
            true,
            &[
                new_order("order_1"),
                new_order("order_2"),
                new_order("order_3"),
            ],
        );
        assert_eq!(again.alert, Some(NewOrderAlert { count: 1 }));
    }

    #[test]
    fn unauthenticated_observations_are_inert_and_keep_state() {
        let mut watcher = OrderWatcher::new(COOLDOWN);
        let t0 = Instant::now();

        let silent = watcher.observe_at(t0, false, &[new_order("order_1")]);
        assert_eq!(silent.new_order_count, 0);
        assert_eq!(silent.alert, None);

        // the unauthenticated look did not consume the baseline
        let first_real = watcher.observe_at(
            t0 + Duration::from_secs(5),
            true,
            &[new_order("order_1"), new_order("order_2")],
        );
        assert_eq!(first_real.new_order_count, 2);
        assert_eq!(first_real.alert, None);
    }

    #[test]
    fn empty_first_snapshot_leaves_the_baseline_unarmed() {
        let mut watcher = OrderWatcher::new(COOLDOWN);
        let t0 = Instant::now();

        watcher.observe_at(t0, true, &[]);

        // still a baseline: no alert for the first non-empty list
        let first = watcher.observe_at(t0 + Duration::from_secs(5), true, &[new_order("order_1")]);
        assert_eq!(first.new_order_count, 1);
        assert_eq!(first.alert, None);

        let second = watcher.observe_at(
            t0 + Duration::from_secs(10),
            true,
            &[new_order("order_1"), new_order("order_2")],
        );
        assert_eq!(second.alert, Some(NewOrderAlert { count: 1 }));
    }

    #[test]
    fn status_transitions_drop_out_of_the_count_silently() {
        let mut watcher = OrderWatcher::new(COOLDOWN);
        let t0 = Instant::now();

        watcher.observe_at(t0, true, &[new_order("order_1"), new_order("order_2")]);

        let after_accept = watcher.observe_at(
            t0 + Duration::from_secs(5),
            true,
            &[
                order("order_1", OrderStatus::Accepted),
                new_order("order_2"),
            ],
        );
        assert_eq!(after_accept.new_order_count, 1);
        assert_eq!(after_accept.alert, None);
    }

    #[test]
    fn an_order_reappearing_as_new_does_not_realert_within_cooldown() {
        let mut watcher = OrderWatcher::new(COOLDOWN);
        let t0 = Instant::now();

        watcher.observe_at(t0, true, &[new_order("order_1")]);
        let alerted = watcher.observe_at(
            t0 + Duration::from_secs(5),
            true,
            &[new_order("order_1"), new_order("order_2")],
        );
        assert!(alerted.alert.is_some());

        // order_3 shows up right away; suppressed but still counted
        let suppressed = watcher.observe_at(
            t0 + Duration::from_secs(6),
            true,
            &[
                new_order("order_1"),
                new_order("order_2"),
                new_order("order_3"),
            ],
        );
        assert_eq!(suppressed.new_order_count, 3);
        assert_eq!(suppressed.alert, None);
    }
}
