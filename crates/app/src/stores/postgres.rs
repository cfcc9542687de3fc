//! PostgreSQL remote store.
//!
//! Every collection is a table of JSONB documents keyed by the record's `id`
//! (see `migrations/`). Table names come from [`Collection::table_name`] only,
//! never from caller input.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgConnection, query, query_scalar, types::Json};
use tally::{entities::Collection, mapping::JsonRecord};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::Db,
    stores::{errors::StoreError, remote::RemoteStore},
};

#[derive(Debug, Clone)]
pub struct PgRemoteStore {
    db: Db,
}

impl PgRemoteStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RemoteStore for PgRemoteStore {
    async fn select_all(&self, collection: Collection) -> Result<Vec<JsonRecord>, StoreError> {
        let sql = format!("SELECT record FROM {collection} ORDER BY seq");

        let rows: Vec<Json<JsonRecord>> = query_scalar(&sql).fetch_all(self.db.pool()).await?;

        Ok(rows.into_iter().map(|Json(record)| record).collect())
    }

    async fn select_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<JsonRecord, StoreError> {
        let sql = format!("SELECT record FROM {collection} WHERE id = $1 ORDER BY seq LIMIT 1");

        let Json(record): Json<JsonRecord> = query_scalar(&sql)
            .bind(id)
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn select_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<JsonRecord>, StoreError> {
        let sql = format!("SELECT record FROM {collection} WHERE record ->> $1 = $2 ORDER BY seq");

        let rows: Vec<Json<JsonRecord>> = query_scalar(&sql)
            .bind(field)
            .bind(value)
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.into_iter().map(|Json(record)| record).collect())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {collection}");

        let count: i64 = query_scalar(&sql).fetch_one(self.db.pool()).await?;

        u64::try_from(count).map_err(|_err| StoreError::InvalidData)
    }

    async fn existing_ids(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<String>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT DISTINCT id FROM {collection} WHERE id = ANY($1)");

        let existing: Vec<String> = query_scalar(&sql)
            .bind(ids)
            .fetch_all(self.db.pool())
            .await?;

        Ok(existing)
    }

    async fn insert_many(
        &self,
        collection: Collection,
        records: Vec<JsonRecord>,
        batch: Uuid,
    ) -> Result<u64, StoreError> {
        let mut conn = self.db.pool().acquire().await?;

        insert_records(&mut *conn, collection, &records, Some(batch)).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        record: JsonRecord,
    ) -> Result<JsonRecord, StoreError> {
        let sql = format!(
            "UPDATE {collection} SET record = jsonb_set($2, '{{id}}', to_jsonb($1::text)) \
             WHERE id = $1 RETURNING record"
        );

        let updated: Vec<Json<JsonRecord>> = query_scalar(&sql)
            .bind(id)
            .bind(Json(&record))
            .fetch_all(self.db.pool())
            .await?;

        updated
            .into_iter()
            .next()
            .map(|Json(record)| record)
            .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {collection} WHERE id = $1");

        let rows_affected = query(&sql)
            .bind(id)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        if rows_affected == 0 {
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
        let mut tx = self.db.pool().begin().await?;

        for collection in [Collection::Appointments, Collection::Purchases] {
            let sql = format!("DELETE FROM {collection} WHERE record ->> 'customer_id' = $1");

            let removed = query(&sql)
                .bind(customer_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

            debug!(%collection, customer_id, removed, "cleared customer history");
        }

        insert_records(&mut *tx, Collection::Appointments, &appointments, None).await?;
        insert_records(&mut *tx, Collection::Purchases, &purchases, None).await?;

        tx.commit().await?;

        Ok(())
    }
}

async fn insert_records(
    conn: &mut PgConnection,
    collection: Collection,
    records: &[JsonRecord],
    batch: Option<Uuid>,
) -> Result<u64, StoreError> {
    if records.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "INSERT INTO {collection} (id, record, migration_batch) \
         SELECT elem ->> 'id', elem, $2 \
         FROM jsonb_array_elements($1) WITH ORDINALITY AS input(elem, ord) \
         ORDER BY ord"
    );

    let array = Value::Array(records.iter().cloned().map(Value::Object).collect());

    let inserted = query(&sql)
        .bind(Json(array))
        .bind(batch)
        .execute(conn)
        .await?
        .rows_affected();

    Ok(inserted)
}
