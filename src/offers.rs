//! Owner-managed promotional offers.
//!
//! Offers live entirely on the client: there is no server copy. The store
//! keeps an ordered in-memory list and writes the full serialized list
//! through to durable storage on every mutation. Persistence failures are
//! logged and the store carries on in memory for the session.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{fresh_id, Offer};
use crate::storage::StorageBackend;

pub const OFFERS_KEY: &str = "tableside_offers";

pub struct OfferStore {
    storage: Arc<dyn StorageBackend>,
    offers: Vec<Offer>,
}

impl OfferStore {
    /// Loads the persisted offer list. A missing, unreadable or unparsable
    /// record degrades to an empty list rather than failing construction.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let offers = match storage.load(OFFERS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(offers) => offers,
                Err(e) => {
                    warn!(error = %e, "Stored offers unparsable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Offer storage unreadable, starting empty");
                Vec::new()
            }
        };
        Self { storage, offers }
    }

    /// Current offers in insertion order.
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Fresh `offer_<unix-millis>_<seq>` identifier for a new offer.
    pub fn next_offer_id() -> String {
        fresh_id("offer")
    }

    pub fn add(&mut self, offer: Offer) {
        self.offers.push(offer);
        self.persist();
    }

    /// Replaces the offer carrying the same id in place, keeping list order.
    /// Unknown ids are ignored.
    pub fn update(&mut self, offer: Offer) {
        if let Some(existing) = self.offers.iter_mut().find(|o| o.id == offer.id) {
            *existing = offer;
            self.persist();
        }
    }

    /// Drops the offer with the given id; absent ids are ignored.
    pub fn delete(&mut self, offer_id: &str) {
        let before = self.offers.len();
        self.offers.retain(|o| o.id != offer_id);
        if self.offers.len() != before {
            self.persist();
        }
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.offers) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize offers, keeping in-memory copy");
                return;
            }
        };
        if let Err(e) = self.storage.store(OFFERS_KEY, &serialized) {
            warn!(error = %e, "Failed to persist offers, keeping in-memory copy");
        }
    }
}
