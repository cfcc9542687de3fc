//! Purchase/consumption aggregation

use rustc_hash::FxHashMap;

use crate::{
    ledger::ConsumptionPolicy,
    records::{Appointment, ProductId, Purchase},
};

/// Per-product purchased units and consumed credits for one customer.
///
/// Both counters are total over every product id seen in either stream; a
/// product that was bought but never booked reports zero consumed credits.
#[derive(Debug, Clone, Default)]
pub struct CreditTally {
    order: Vec<ProductId>,
    purchased: FxHashMap<ProductId, u64>,
    consumed: FxHashMap<ProductId, u64>,
}

impl CreditTally {
    /// Aggregate one customer's purchases and appointments.
    ///
    /// The caller is expected to have filtered both slices to a single
    /// customer. Product ids that no longer resolve to a product are carried
    /// through untouched.
    pub fn from_events(
        purchases: &[Purchase],
        appointments: &[Appointment],
        policy: ConsumptionPolicy,
    ) -> Self {
        let mut tally = Self::default();

        for purchase in purchases {
            tally.touch(&purchase.product_id);

            let units = tally.purchased.entry(purchase.product_id.clone()).or_default();
            *units = units.saturating_add(purchase.quantity);
        }

        for appointment in appointments.iter().filter(|a| policy.consumes(a)) {
            tally.touch(&appointment.product_id);

            let credits = tally.consumed.entry(appointment.product_id.clone()).or_default();
            *credits = credits.saturating_add(1);
        }

        tally
    }

    fn touch(&mut self, product_id: &ProductId) {
        if !self.purchased.contains_key(product_id) && !self.consumed.contains_key(product_id) {
            self.order.push(product_id.clone());
        }
    }

    /// Total units bought of the product.
    pub fn purchased_units(&self, product_id: &ProductId) -> u64 {
        self.purchased.get(product_id).copied().unwrap_or_default()
    }

    /// Credits consumed against the product.
    pub fn consumed_credits(&self, product_id: &ProductId) -> u64 {
        self.consumed.get(product_id).copied().unwrap_or_default()
    }

    /// Product ids that have at least one purchase, in first-purchase order.
    pub fn purchased_product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.order
            .iter()
            .filter(|product_id| self.purchased.contains_key(*product_id))
    }
}
