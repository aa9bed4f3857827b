use serde::{Deserialize, Serialize};

/// A promotional offer shown on the customer menu.
///
/// Owned entirely by this client and persisted locally; the remote service
/// never sees offers. Serde derives define the persisted JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-text discount label, e.g. "20% off" or "2 for 1".
    pub discount: String,
}

impl Offer {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        discount: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            discount: discount.into(),
        }
    }
}
