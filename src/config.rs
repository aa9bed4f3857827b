//! Runtime configuration.
//!
//! Defaults suit the demo binary; `TABLESIDE_DATA_DIR` and
//! `TABLESIDE_OWNER_PASSCODE` override the durable-storage location and the
//! owner passcode. Log verbosity is driven separately by `RUST_LOG`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_ALERT_COOLDOWN: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Buffer size for the actor request channels.
    pub channel_capacity: usize,
    /// How often the notification service polls the order list.
    pub poll_interval: Duration,
    /// Suppression window after a fired new-order alert.
    pub alert_cooldown: Duration,
    /// Buffer size for the alert channel; overflow drops alerts.
    pub alert_buffer: usize,
    /// Directory for durable local state (the offer list).
    pub data_dir: PathBuf,
    /// Owner passcode checked by the stand-in service.
    pub passcode: String,
    /// Shop name the stand-in service starts with.
    pub shop_name: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            poll_interval: DEFAULT_POLL_INTERVAL,
            alert_cooldown: DEFAULT_ALERT_COOLDOWN,
            alert_buffer: 8,
            data_dir: PathBuf::from(".tableside"),
            passcode: "hot-waffles".to_string(),
            shop_name: "Waffle Corner".to_string(),
        }
    }
}

impl ShopConfig {
    /// Reads environment overrides on top of the defaults. Unset or empty
    /// variables keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("TABLESIDE_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(passcode) = env::var("TABLESIDE_OWNER_PASSCODE") {
            if !passcode.is_empty() {
                config.passcode = passcode;
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // single test so the env mutations cannot race a parallel reader
    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        env::remove_var("TABLESIDE_DATA_DIR");
        env::remove_var("TABLESIDE_OWNER_PASSCODE");

        let config = ShopConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from(".tableside"));
        assert_eq!(config.passcode, "hot-waffles");
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.alert_cooldown, DEFAULT_ALERT_COOLDOWN);

        env::set_var("TABLESIDE_DATA_DIR", "/tmp/tableside-test");
        env::set_var("TABLESIDE_OWNER_PASSCODE", "secret");

        let overridden = ShopConfig::from_env();
        assert_eq!(overridden.data_dir, PathBuf::from("/tmp/tableside-test"));
        assert_eq!(overridden.passcode, "secret");

        env::remove_var("TABLESIDE_DATA_DIR");
        env::remove_var("TABLESIDE_OWNER_PASSCODE");
    }
}
