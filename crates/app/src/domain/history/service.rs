//! History service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tally::{
    entities::Collection,
    mapping::{JsonRecord, into_storage},
    records::{Appointment, CustomerId, Purchase},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::history::{
        errors::HistoryServiceError,
        models::{HistoryReplaced, HistoryUpdate},
    },
    stores::RemoteStore,
};

#[derive(Clone)]
pub struct RemoteHistoryService {
    remote: Arc<dyn RemoteStore>,
}

impl RemoteHistoryService {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl HistoryService for RemoteHistoryService {
    async fn replace_history(
        &self,
        customer: &CustomerId,
        update: HistoryUpdate,
    ) -> Result<HistoryReplaced, HistoryServiceError> {
        self.remote
            .select_by_id(Collection::Customers, customer.as_str())
            .await?;

        let appointments = update
            .appointments
            .into_iter()
            .map(|appointment| {
                into_storage(Appointment {
                    id: if appointment.id.is_blank() {
                        Uuid::now_v7().to_string().into()
                    } else {
                        appointment.id
                    },
                    customer_id: customer.clone(),
                    ..appointment
                })
            })
            .collect::<Result<Vec<JsonRecord>, _>>()?;

        let (valid, dropped): (Vec<_>, Vec<_>) = update
            .purchase_items
            .into_iter()
            .partition(|item| item.is_valid());

        let purchased_at = Timestamp::now().to_string();

        let purchases = valid
            .into_iter()
            .map(|item| {
                into_storage(Purchase {
                    id: Uuid::now_v7().to_string().into(),
                    customer_id: customer.clone(),
                    product_id: item.product_id,
                    quantity: item.quantity,
                    purchase_date: purchased_at.clone(),
                    ..Purchase::default()
                })
            })
            .collect::<Result<Vec<JsonRecord>, _>>()?;

        let replaced = HistoryReplaced {
            appointments: appointments.len(),
            purchases: purchases.len(),
            dropped_items: dropped.len(),
        };

        self.remote
            .replace_customer_history(customer.as_str(), appointments, purchases)
            .await?;

        info!(
            %customer,
            appointments = replaced.appointments,
            purchases = replaced.purchases,
            dropped = replaced.dropped_items,
            "replaced customer history"
        );

        Ok(replaced)
    }
}

#[automock]
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Replace a customer's appointments and purchases in one step.
    ///
    /// Incomplete purchase lines are dropped; every purchase is stamped with a
    /// fresh id and the current time.
    async fn replace_history(
        &self,
        customer: &CustomerId,
        update: HistoryUpdate,
    ) -> Result<HistoryReplaced, HistoryServiceError>;
}
