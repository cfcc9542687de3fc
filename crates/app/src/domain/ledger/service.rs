//! Ledger service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tally::{
    entities::Collection,
    ledger::{ConsumptionPolicy, VoucherBalance, voucher_balances},
    mapping::{JsonRecord, Mapped, from_storage},
    records::{Appointment, CustomerId, Product, Purchase},
};
use tracing::{debug, warn};

use crate::{domain::ledger::errors::LedgerServiceError, stores::RemoteStore};

/// Ledger backed by the remote store.
#[derive(Clone)]
pub struct RemoteLedgerService {
    remote: Arc<dyn RemoteStore>,
}

impl RemoteLedgerService {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }
}

/// Decodes every well-formed row, dropping the rest with a warning.
fn decode_all<T: Mapped>(collection: Collection, rows: Vec<JsonRecord>) -> Vec<T> {
    let mut skipped = 0_usize;

    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match from_storage::<T>(row) {
            Ok(record) => Some(record),
            Err(error) => {
                skipped += 1;
                warn!(%collection, index, %error, "skipping malformed ledger row");
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!(%collection, skipped, "ledger rows were left out of the balance");
    }

    decoded
}

#[async_trait]
impl LedgerService for RemoteLedgerService {
    async fn voucher_balances(
        &self,
        customer: &CustomerId,
        policy: ConsumptionPolicy,
    ) -> Result<Vec<VoucherBalance>, LedgerServiceError> {
        // Confirms the customer exists.
        self.remote
            .select_by_id(Collection::Customers, customer.as_str())
            .await?;

        let purchases: Vec<Purchase> = decode_all(
            Collection::Purchases,
            self.remote
                .select_where(Collection::Purchases, "customer_id", customer.as_str())
                .await?,
        );

        let appointments: Vec<Appointment> = decode_all(
            Collection::Appointments,
            self.remote
                .select_where(Collection::Appointments, "customer_id", customer.as_str())
                .await?,
        );

        let products: Vec<Product> = decode_all(
            Collection::Products,
            self.remote.select_all(Collection::Products).await?,
        );

        debug!(
            %customer,
            purchases = purchases.len(),
            appointments = appointments.len(),
            "computing voucher balances"
        );

        Ok(voucher_balances(
            customer,
            &purchases,
            &appointments,
            &products,
            policy,
        ))
    }
}

#[automock]
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// A customer's remaining credits per product, in first-purchase order.
    async fn voucher_balances(
        &self,
        customer: &CustomerId,
        policy: ConsumptionPolicy,
    ) -> Result<Vec<VoucherBalance>, LedgerServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::stores::{MemoryRemoteStore, StoreError};

    use super::*;

    fn rows(values: Vec<Value>) -> Vec<JsonRecord> {
        values
            .into_iter()
            .filter_map(|value| value.as_object().cloned())
            .collect()
    }

    async fn seeded() -> Result<MemoryRemoteStore, StoreError> {
        let store = MemoryRemoteStore::new();
        let batch = Uuid::now_v7();

        store
            .insert_many(
                Collection::Customers,
                rows(vec![json!({ "id": "cust-1" }), json!({ "id": "cust-2" })]),
                batch,
            )
            .await?;
        store
            .insert_many(
                Collection::Products,
                rows(vec![
                    json!({ "id": "prod-1", "name": "Facial x10", "type": "voucher", "count": 10 }),
                ]),
                batch,
            )
            .await?;
        store
            .insert_many(
                Collection::Purchases,
                rows(vec![
                    json!({ "id": "pur-1", "customer_id": "cust-1", "product_id": "prod-1", "quantity": 2 }),
                    json!({ "id": "pur-2", "customer_id": "cust-2", "product_id": "prod-1", "quantity": 1 }),
                    json!({ "id": "pur-3", "customer_id": "cust-1", "product_id": "gone", "quantity": 4 }),
                ]),
                batch,
            )
            .await?;
        store
            .insert_many(
                Collection::Appointments,
                rows(vec![
                    json!({ "id": "a-1", "customer_id": "cust-1", "product_id": "prod-1", "status": "completed" }),
                    json!({ "id": "a-2", "customer_id": "cust-1", "product_id": "prod-1", "status": "no-show" }),
                    json!({ "id": "a-3", "customer_id": "cust-1", "product_id": "prod-1", "status": null }),
                    json!({ "id": "a-4", "customer_id": "cust-2", "product_id": "prod-1" }),
                ]),
                batch,
            )
            .await?;

        Ok(store)
    }

    #[tokio::test]
    async fn balances_are_computed_from_stored_events() -> TestResult {
        let service = RemoteLedgerService::new(Arc::new(seeded().await?));

        let balances = service
            .voucher_balances(&"cust-1".into(), ConsumptionPolicy::EveryAppointment)
            .await?;

        assert_eq!(balances.len(), 1, "the deleted product is skipped");

        let balance = balances.first();

        assert_eq!(balance.map(|b| b.product_name.as_str()), Some("Facial x10"));
        assert_eq!(balance.map(|b| b.remaining_credits), Some(17));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_rows_are_left_out_of_balances() -> TestResult {
        let store = seeded().await?;
        let batch = Uuid::now_v7();

        store
            .insert_many(
                Collection::Products,
                rows(vec![
                    json!({ "id": "prod-9", "name": "Peel x5", "type": "voucher", "price": "bad" }),
                ]),
                batch,
            )
            .await?;
        store
            .insert_many(
                Collection::Purchases,
                rows(vec![
                    json!({ "id": "pur-9", "customer_id": "cust-1", "product_id": "prod-1", "quantity": "two" }),
                ]),
                batch,
            )
            .await?;

        let service = RemoteLedgerService::new(Arc::new(store));

        let balances = service
            .voucher_balances(&"cust-1".into(), ConsumptionPolicy::EveryAppointment)
            .await?;

        assert_eq!(balances.len(), 1);
        assert_eq!(balances.first().map(|b| b.remaining_credits), Some(17));

        Ok(())
    }

    #[tokio::test]
    async fn policy_is_applied_to_stored_statuses() -> TestResult {
        let service = RemoteLedgerService::new(Arc::new(seeded().await?));

        let balances = service
            .voucher_balances(&"cust-1".into(), ConsumptionPolicy::ExcludeCancelled)
            .await?;

        assert_eq!(balances.first().map(|b| b.remaining_credits), Some(18));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_customers_are_reported() -> TestResult {
        let service = RemoteLedgerService::new(Arc::new(seeded().await?));

        let result = service
            .voucher_balances(&"nobody".into(), ConsumptionPolicy::default())
            .await;

        assert!(matches!(result, Err(LedgerServiceError::CustomerNotFound)));

        Ok(())
    }
}
