//! In-memory remote store.

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use tally::{entities::Collection, mapping::JsonRecord};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::stores::{
    errors::StoreError,
    remote::{RemoteStore, record_id},
};

#[derive(Debug, Clone)]
struct StoredRecord {
    record: JsonRecord,
    batch: Option<Uuid>,
}

/// A [`RemoteStore`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    collections: RwLock<FxHashMap<Collection, Vec<StoredRecord>>>,
}

impl MemoryRemoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Migration batch of every record in the collection, in insertion order.
    pub async fn batches(&self, collection: Collection) -> Vec<Option<Uuid>> {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(|records| records.iter().map(|stored| stored.batch).collect())
            .unwrap_or_default()
    }
}

fn ensure_ids(records: &[JsonRecord]) -> Result<(), StoreError> {
    if records.iter().all(|record| record_id(record).is_some()) {
        Ok(())
    } else {
        Err(StoreError::MissingRequiredData)
    }
}

fn has_id(stored: &StoredRecord, id: &str) -> bool {
    record_id(&stored.record) == Some(id)
}

fn field_matches(record: &JsonRecord, field: &str, value: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => text == value,
        Some(other) => other.to_string() == value,
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn select_all(&self, collection: Collection) -> Result<Vec<JsonRecord>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .map(|records| records.iter().map(|stored| stored.record.clone()).collect())
            .unwrap_or_default())
    }

    async fn select_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<JsonRecord, StoreError> {
        let collections = self.collections.read().await;

        collections
            .get(&collection)
            .and_then(|records| records.iter().find(|stored| has_id(stored, id)))
            .map(|stored| stored.record.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn select_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<JsonRecord>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|stored| field_matches(&stored.record, field, value))
                    .map(|stored| stored.record.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;

        let len = collections.get(&collection).map_or(0, Vec::len);

        u64::try_from(len).map_err(|_err| StoreError::InvalidData)
    }

    async fn existing_ids(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;

        let present: FxHashSet<&str> = collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter_map(|stored| record_id(&stored.record))
                    .collect()
            })
            .unwrap_or_default();

        let mut seen = FxHashSet::default();

        Ok(ids
            .iter()
            .filter(|id| present.contains(id.as_str()) && seen.insert(id.as_str()))
            .cloned()
            .collect())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        records: Vec<JsonRecord>,
        batch: Uuid,
    ) -> Result<u64, StoreError> {
        ensure_ids(&records)?;

        let inserted = u64::try_from(records.len()).map_err(|_err| StoreError::InvalidData)?;

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .extend(records.into_iter().map(|record| StoredRecord {
                record,
                batch: Some(batch),
            }));

        Ok(inserted)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        mut record: JsonRecord,
    ) -> Result<JsonRecord, StoreError> {
        record.insert("id".to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;

        let mut matched = collections
            .get_mut(&collection)
            .into_iter()
            .flatten()
            .filter(|stored| has_id(stored, id))
            .peekable();

        if matched.peek().is_none() {
            return Err(StoreError::NotFound);
        }

        for stored in matched {
            stored.record = record.clone();
        }

        Ok(record)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;

        let records = collections
            .get_mut(&collection)
            .ok_or(StoreError::NotFound)?;

        let before = records.len();
        records.retain(|stored| !has_id(stored, id));

        if records.len() == before {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn replace_customer_history(
        &self,
        customer_id: &str,
        appointments: Vec<JsonRecord>,
        purchases: Vec<JsonRecord>,
    ) -> Result<(), StoreError> {
        ensure_ids(&appointments)?;
        ensure_ids(&purchases)?;

        let mut collections = self.collections.write().await;

        for (collection, replacement) in [
            (Collection::Appointments, appointments),
            (Collection::Purchases, purchases),
        ] {
            let records = collections.entry(collection).or_default();

            records.retain(|stored| !field_matches(&stored.record, "customer_id", customer_id));
            records.extend(
                replacement
                    .into_iter()
                    .map(|record| StoredRecord { record, batch: None }),
            );
        }

        Ok(())
    }
}
