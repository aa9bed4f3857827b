//! Business domain entities. Pure data structures with no actor or
//! persistence concerns beyond the serde derives on the locally stored types.

pub mod menu;
pub mod offer;
pub mod order;
pub mod settings;

pub use menu::*;
pub use offer::*;
pub use order::*;
pub use settings::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Generate a `<prefix>_<unix-millis>_<seq>` identifier.
///
/// The process-local sequence keeps ids distinct when calls land inside the
/// same millisecond. Unique for a single device with one owner editing at a
/// time; not meant to survive concurrent multi-device editing.
pub fn fresh_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::SeqCst);
    format!("{}_{}_{}", prefix, millis, seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_id_carries_prefix_and_numeric_parts() {
        let id = fresh_id("offer");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "offer");
        assert!(parts[1].parse::<u128>().is_ok(), "millis {} not numeric", parts[1]);
        assert!(parts[2].parse::<u64>().is_ok(), "sequence {} not numeric", parts[2]);
    }

    #[test]
    fn rapid_ids_never_collide() {
        let ids: std::collections::HashSet<String> =
            (0..1000).map(|_| fresh_id("item")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
