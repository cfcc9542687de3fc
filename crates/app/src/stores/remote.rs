//! Remote record store.

use async_trait::async_trait;
use mockall::automock;
use tally::{entities::Collection, mapping::JsonRecord};
use uuid::Uuid;

use crate::stores::errors::StoreError;

/// Per-collection structured record store.
///
/// Records go in and come out in storage (snake_case) shape.
#[automock]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Every record in the collection, in insertion order.
    async fn select_all(&self, collection: Collection) -> Result<Vec<JsonRecord>, StoreError>;

    /// The first record with the given id.
    async fn select_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<JsonRecord, StoreError>;

    /// Records whose top-level `field` equals the given text.
    async fn select_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<JsonRecord>, StoreError>;

    /// Number of records in the collection.
    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// The subset of `ids` already present in the collection.
    async fn existing_ids(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<String>, StoreError>;

    /// Insert every record in one request, tagging each with the batch id.
    ///
    /// Either every record is inserted or none is. Returns the number of
    /// records inserted.
    async fn insert_many(
        &self,
        collection: Collection,
        records: Vec<JsonRecord>,
        batch: Uuid,
    ) -> Result<u64, StoreError>;

    /// Replace the record with the given id.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        record: JsonRecord,
    ) -> Result<JsonRecord, StoreError>;

    /// Delete every record with the given id.
    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    /// Atomically replace a customer's appointments and purchases.
    async fn replace_customer_history(
        &self,
        customer_id: &str,
        appointments: Vec<JsonRecord>,
        purchases: Vec<JsonRecord>,
    ) -> Result<(), StoreError>;
}

/// The `id` of a storage record, when present and non-blank.
pub(crate) fn record_id(record: &JsonRecord) -> Option<&str> {
    record
        .get("id")
        .and_then(serde_json::Value::as_str)
        .filter(|id| !id.trim().is_empty())
}
