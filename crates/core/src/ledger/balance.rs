//! Balance calculation

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    ledger::{ConsumptionPolicy, CreditTally},
    records::{Appointment, CustomerId, Product, ProductId, Purchase},
};

/// Remaining credits of one product for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherBalance {
    /// Customer the balance belongs to.
    pub customer_id: CustomerId,

    /// Product the credits are for.
    pub product_id: ProductId,

    /// Product display name.
    pub product_name: String,

    /// Credits granted per purchased unit.
    pub unit_credits: u32,

    /// Units bought across every purchase.
    pub total_purchased_units: u64,

    /// `total_purchased_units * unit_credits`
    pub total_credits_purchased: u64,

    /// Credits used by appointments.
    pub total_credits_consumed: u64,

    /// Credits left; always positive.
    pub remaining_credits: u64,
}

/// Compute a customer's remaining credits per product.
///
/// Purchases and appointments for other customers are ignored. Products that
/// cannot be found are skipped, as are products with nothing left. Entries
/// come out in the order their products were first purchased.
pub fn voucher_balances(
    customer_id: &CustomerId,
    purchases: &[Purchase],
    appointments: &[Appointment],
    products: &[Product],
    policy: ConsumptionPolicy,
) -> Vec<VoucherBalance> {
    let purchases: Vec<Purchase> = purchases
        .iter()
        .filter(|purchase| &purchase.customer_id == customer_id)
        .cloned()
        .collect();

    let appointments: Vec<Appointment> = appointments
        .iter()
        .filter(|appointment| &appointment.customer_id == customer_id)
        .cloned()
        .collect();

    let tally = CreditTally::from_events(&purchases, &appointments, policy);

    let catalog: FxHashMap<&ProductId, &Product> =
        products.iter().map(|product| (&product.id, product)).collect();

    tally
        .purchased_product_ids()
        .filter_map(|product_id| {
            let product = catalog.get(product_id)?;

            let unit_credits = product.unit_credits();
            let total_purchased_units = tally.purchased_units(product_id);
            let total_credits_purchased =
                total_purchased_units.saturating_mul(u64::from(unit_credits));
            let total_credits_consumed = tally.consumed_credits(product_id);

            // Overdrawn balances mean nothing remaining, never debt.
            let remaining_credits = total_credits_purchased.checked_sub(total_credits_consumed)?;

            (remaining_credits > 0).then(|| VoucherBalance {
                customer_id: customer_id.clone(),
                product_id: product_id.clone(),
                product_name: product.name.clone(),
                unit_credits,
                total_purchased_units,
                total_credits_purchased,
                total_credits_consumed,
                remaining_credits,
            })
        })
        .collect()
}
