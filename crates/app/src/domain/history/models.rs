//! History models.

use serde::Deserialize;
use tally::records::{Appointment, ProductId};

/// One purchase line as entered on the customer form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub product_id: ProductId,
    pub quantity: u64,
}

impl PurchaseItem {
    /// Lines without a product or with no units are ignored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.product_id.is_blank() && self.quantity > 0
    }
}

/// A customer's complete replacement history.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryUpdate {
    pub appointments: Vec<Appointment>,
    pub purchase_items: Vec<PurchaseItem>,
}

/// What a history replacement wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryReplaced {
    pub appointments: usize,
    pub purchases: usize,

    /// Purchase lines ignored as incomplete.
    pub dropped_items: usize,
}
