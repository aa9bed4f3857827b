//! Owner-session flag.
//!
//! A single boolean in session-scoped storage marks the tab as an
//! authenticated owner. This is UI gating only: the authoritative check
//! lives behind the remote service, and the flag vanishing with the session
//! is the logout-on-close behavior the front-end wants.

use std::sync::Arc;

use tracing::warn;

use crate::storage::StorageBackend;

pub const OWNER_AUTH_KEY: &str = "tableside_owner_auth";
const AUTH_SENTINEL: &str = "true";

/// Handle to the owner-session flag. Clones share the same backing storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Marks the current session as an authenticated owner.
    pub fn set_authenticated(&self) {
        if let Err(e) = self.storage.store(OWNER_AUTH_KEY, AUTH_SENTINEL) {
            warn!(error = %e, "Failed to persist owner session flag");
        }
    }

    /// Clears the owner flag (logout).
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(OWNER_AUTH_KEY) {
            warn!(error = %e, "Failed to clear owner session flag");
        }
    }

    /// True only when the sentinel is present. Storage errors read as
    /// unauthenticated.
    pub fn is_authenticated(&self) -> bool {
        match self.storage.load(OWNER_AUTH_KEY) {
            Ok(Some(value)) => value == AUTH_SENTINEL,
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read owner session flag");
                false
            }
        }
    }
}
