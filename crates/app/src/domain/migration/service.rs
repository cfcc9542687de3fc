//! Migration engine.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;
use tally::{entities::EntityKind, mapping::to_storage};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    domain::migration::{
        errors::{MigrationJobError, MigrationServiceError},
        models::{
            DuplicatePolicy, JobOutcome, JobResult, JobSummary, MigrationReport, MigrationStatus,
        },
        status::StatusProber,
    },
    stores::{LocalCache, RemoteStore, remote::record_id},
};

/// Moves locally cached records into the remote store.
#[derive(Clone)]
pub struct MigrationEngine {
    local: Arc<dyn LocalCache>,
    remote: Arc<dyn RemoteStore>,
    prober: StatusProber,
}

impl MigrationEngine {
    #[must_use]
    pub fn new(local: Arc<dyn LocalCache>, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            prober: StatusProber::new(local.clone(), remote.clone()),
            local,
            remote,
        }
    }

    async fn selected_job(
        &self,
        kinds: &[EntityKind],
        kind: EntityKind,
        batch: Uuid,
        policy: DuplicatePolicy,
    ) -> JobResult {
        if kinds.contains(&kind) {
            self.run_job(kind, batch, policy).await
        } else {
            Ok(JobOutcome::NotSelected)
        }
    }

    #[instrument(skip(self))]
    async fn run_job(&self, kind: EntityKind, batch: Uuid, policy: DuplicatePolicy) -> JobResult {
        debug!("reading local records");

        let local = self
            .local
            .read_all(kind)
            .await
            .map_err(|source| MigrationJobError::LocalRead { kind, source })?;

        if local.is_empty() {
            info!("nothing to migrate");
            return Ok(JobOutcome::NoOp);
        }

        let collection = kind.collection();
        let read = local.len();
        let mut rejected = 0;
        let mut records = Vec::with_capacity(read);

        for (index, value) in local.into_iter().enumerate() {
            match to_storage(collection, value) {
                Ok(record) if record_id(&record).is_some() => records.push(record),
                Ok(_) => {
                    rejected += 1;
                    warn!(index, "skipping local record without an id");
                }
                Err(error) => {
                    rejected += 1;
                    warn!(index, %error, "skipping malformed local record");
                }
            }
        }

        let mut skipped = 0;

        if policy == DuplicatePolicy::SkipExisting && !records.is_empty() {
            let ids: Vec<String> = records
                .iter()
                .filter_map(record_id)
                .map(str::to_string)
                .collect();

            let existing: FxHashSet<String> = self
                .remote
                .existing_ids(collection, &ids)
                .await
                .map_err(|source| MigrationJobError::RemoteLookup { kind, source })?
                .into_iter()
                .collect();

            let mut seen = FxHashSet::default();
            let before = records.len();

            records.retain(|record| {
                record_id(record)
                    .is_some_and(|id| !existing.contains(id) && seen.insert(id.to_string()))
            });

            skipped = before - records.len();
        }

        let inserted = if records.is_empty() {
            0
        } else {
            debug!(records = records.len(), "writing remote records");

            self.remote
                .insert_many(collection, records, batch)
                .await
                .map_err(|source| MigrationJobError::RemoteWrite { kind, source })?
        };

        info!(read, rejected, skipped, inserted, "migrated {kind}");

        Ok(JobOutcome::Migrated(JobSummary {
            read,
            rejected,
            skipped,
            inserted,
        }))
    }
}

#[async_trait]
impl MigrationService for MigrationEngine {
    async fn migrate_all(&self, policy: DuplicatePolicy) -> MigrationReport {
        self.migrate_selected(&EntityKind::MIGRATION_ORDER, policy).await
    }

    async fn migrate_selected(
        &self,
        kinds: &[EntityKind],
        policy: DuplicatePolicy,
    ) -> MigrationReport {
        let batch = Uuid::now_v7();

        info!(%batch, ?policy, ?kinds, "starting migration");

        let customers = self.selected_job(kinds, EntityKind::Customer, batch, policy).await;
        let products = self.selected_job(kinds, EntityKind::Product, batch, policy).await;
        let appointments = self.selected_job(kinds, EntityKind::Appointment, batch, policy).await;
        let finance = self.selected_job(kinds, EntityKind::Finance, batch, policy).await;

        let report = MigrationReport {
            batch,
            customers,
            products,
            appointments,
            finance,
        };

        for (kind, result) in report.iter() {
            if let Err(error) = result {
                warn!(%kind, %error, "migration job failed");
            }
        }

        info!(%batch, success = report.is_complete_success(), "migration finished");

        report
    }

    async fn clear_local(&self, kinds: &[EntityKind]) -> Result<(), MigrationServiceError> {
        for &kind in kinds {
            self.local
                .clear(kind)
                .await
                .map_err(|source| MigrationServiceError::Cache { kind, source })?;

            info!(%kind, bucket = kind.bucket(), "cleared local bucket");
        }

        Ok(())
    }

    async fn status(&self) -> Result<MigrationStatus, MigrationServiceError> {
        self.prober.probe().await
    }
}

#[automock]
#[async_trait]
pub trait MigrationService: Send + Sync {
    /// Run every entity job in migration order under one batch id.
    ///
    /// Jobs run one after another and fail independently.
    async fn migrate_all(&self, policy: DuplicatePolicy) -> MigrationReport;

    /// Run the jobs for the given entity kinds, still in migration order and
    /// under one batch id. Kinds that are not listed are reported as
    /// [`JobOutcome::NotSelected`].
    async fn migrate_selected(
        &self,
        kinds: &[EntityKind],
        policy: DuplicatePolicy,
    ) -> MigrationReport;

    /// Delete the given local buckets, and only those, without verification.
    async fn clear_local(&self, kinds: &[EntityKind]) -> Result<(), MigrationServiceError>;

    /// Count local and remote records.
    async fn status(&self) -> Result<MigrationStatus, MigrationServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tally::entities::Collection;
    use testresult::TestResult;

    use crate::stores::{
        CacheError, MemoryLocalCache, MemoryRemoteStore, MockLocalCache, MockRemoteStore,
        StoreError,
    };

    use super::*;

    fn customers(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| {
                json!({
                    "id": format!("cust-{i}"),
                    "name": format!("Customer {i}"),
                    "birthDate": "1990-01-01",
                    "purchasedProducts": [],
                })
            })
            .collect()
    }

    fn engine(local: MemoryLocalCache, remote: &Arc<MemoryRemoteStore>) -> MigrationEngine {
        MigrationEngine::new(Arc::new(local), remote.clone())
    }

    #[tokio::test]
    async fn empty_local_data_is_a_no_op_without_remote_writes() {
        // The mock has no expectations: any remote call fails the test.
        let engine = MigrationEngine::new(
            Arc::new(MemoryLocalCache::new()),
            Arc::new(MockRemoteStore::new()),
        );

        for policy in [DuplicatePolicy::SkipExisting, DuplicatePolicy::Insert] {
            let report = engine.migrate_all(policy).await;

            assert!(report.is_complete_success());

            for summary in report.summaries() {
                assert!(summary.success, "{} should succeed", summary.entity);
                assert_eq!(summary.count, 0, "{} should insert nothing", summary.entity);
            }

            assert!(matches!(report.customers, Ok(JobOutcome::NoOp)));
        }
    }

    #[tokio::test]
    async fn migrates_each_kind_and_clears_only_requested_buckets() -> TestResult {
        let local = MemoryLocalCache::new()
            .with(EntityKind::Customer, customers(5))
            .with(EntityKind::Product, Vec::new())
            .with(
                EntityKind::Finance,
                vec![json!({ "id": "fin-1", "date": "2024-01-05", "type": "income", "title": "Facial", "amount": 90000 })],
            );
        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(local, &remote);

        let report = engine.migrate_all(DuplicatePolicy::default()).await;
        let counts: Vec<(EntityKind, bool, u64)> = report
            .summaries()
            .into_iter()
            .map(|s| (s.entity, s.success, s.count))
            .collect();

        assert_eq!(
            counts,
            [
                (EntityKind::Customer, true, 5),
                (EntityKind::Product, true, 0),
                (EntityKind::Appointment, true, 0),
                (EntityKind::Finance, true, 1),
            ]
        );

        let stored = remote.select_all(Collection::Customers).await?;

        assert!(
            stored.iter().all(|r| r.contains_key("birth_date") && !r.contains_key("birthDate")),
            "rows are written in storage shape"
        );

        engine.clear_local(&[EntityKind::Customer]).await?;

        let status = engine.status().await?;

        assert_eq!(status.local_counts.customers, 0);
        assert_eq!(status.local_counts.finance, 1, "finance bucket was not passed");

        Ok(())
    }

    #[tokio::test]
    async fn repeated_unconditional_runs_duplicate_remote_rows() -> TestResult {
        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(
            MemoryLocalCache::new().with(EntityKind::Customer, customers(5)),
            &remote,
        );

        let first = engine.migrate_all(DuplicatePolicy::Insert).await;
        let second = engine.migrate_all(DuplicatePolicy::Insert).await;

        assert_eq!(first.customers.as_ref().map(JobOutcome::count).ok(), Some(5));
        assert_eq!(second.customers.as_ref().map(JobOutcome::count).ok(), Some(5));

        // Known hazard of the legacy policy: the remote customer count doubles.
        assert_eq!(remote.count(Collection::Customers).await?, 10);

        Ok(())
    }

    #[tokio::test]
    async fn repeated_default_runs_skip_migrated_records() -> TestResult {
        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(
            MemoryLocalCache::new().with(EntityKind::Customer, customers(5)),
            &remote,
        );

        let first = engine.migrate_all(DuplicatePolicy::SkipExisting).await;
        let second = engine.migrate_all(DuplicatePolicy::SkipExisting).await;

        assert_eq!(first.customers.as_ref().map(JobOutcome::count).ok(), Some(5));
        assert!(matches!(
            second.customers,
            Ok(JobOutcome::Migrated(JobSummary {
                read: 5,
                skipped: 5,
                inserted: 0,
                ..
            }))
        ));
        assert_eq!(remote.count(Collection::Customers).await?, 5);

        let batches = remote.batches(Collection::Customers).await;

        assert!(
            batches.iter().all(|batch| *batch == Some(first.batch)),
            "every row belongs to the first run's batch"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_local_ids_are_inserted_once_by_default() {
        let mut records = customers(2);
        records.extend(customers(1));

        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(MemoryLocalCache::new().with(EntityKind::Customer, records), &remote);

        let result = engine
            .migrate_selected(&[EntityKind::Customer], DuplicatePolicy::SkipExisting)
            .await
            .customers;

        assert!(matches!(
            result,
            Ok(JobOutcome::Migrated(JobSummary {
                read: 3,
                skipped: 1,
                inserted: 2,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn malformed_local_records_are_excluded() {
        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(
            MemoryLocalCache::new().with(
                EntityKind::Customer,
                vec![
                    json!({ "id": "cust-1", "name": "Kim" }),
                    json!("not a record"),
                    json!({ "name": "no id" }),
                    json!({ "id": "cust-2", "point": "lots" }),
                ],
            ),
            &remote,
        );

        let result = engine
            .migrate_selected(&[EntityKind::Customer], DuplicatePolicy::Insert)
            .await
            .customers;

        assert!(
            matches!(
                result,
                Ok(JobOutcome::Migrated(JobSummary {
                    read: 4,
                    rejected: 3,
                    skipped: 0,
                    inserted: 1,
                }))
            ),
            "unexpected outcome {result:?}"
        );
    }

    #[tokio::test]
    async fn fractional_numbers_are_migrated_as_entered() -> TestResult {
        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(
            MemoryLocalCache::new()
                .with(
                    EntityKind::Customer,
                    vec![json!({ "id": "cust-1", "point": 12.5 })],
                )
                .with(
                    EntityKind::Product,
                    vec![json!({ "id": "p-1", "price": 45000.5, "type": "single" })],
                ),
            &remote,
        );

        let report = engine.migrate_all(DuplicatePolicy::SkipExisting).await;

        for kind in [EntityKind::Customer, EntityKind::Product] {
            assert!(
                matches!(
                    report.get(kind),
                    Ok(JobOutcome::Migrated(JobSummary {
                        read: 1,
                        rejected: 0,
                        inserted: 1,
                        ..
                    }))
                ),
                "{kind} should migrate: {:?}",
                report.get(kind)
            );
        }

        let product = remote.select_by_id(Collection::Products, "p-1").await?;

        assert_eq!(product.get("price"), Some(&json!(45000.5)));

        let customer = remote.select_by_id(Collection::Customers, "cust-1").await?;

        assert_eq!(customer.get("point"), Some(&json!(12.5)));

        Ok(())
    }

    #[tokio::test]
    async fn selected_runs_leave_other_kinds_untouched() -> TestResult {
        let remote = Arc::new(MemoryRemoteStore::new());
        let engine = engine(
            MemoryLocalCache::new()
                .with(EntityKind::Customer, customers(2))
                .with(EntityKind::Finance, vec![json!({ "id": "fin-1", "amount": 1 })]),
            &remote,
        );

        let report = engine
            .migrate_selected(&[EntityKind::Finance], DuplicatePolicy::SkipExisting)
            .await;

        assert!(report.is_complete_success());
        assert!(matches!(report.customers, Ok(JobOutcome::NotSelected)));
        assert!(matches!(report.products, Ok(JobOutcome::NotSelected)));
        assert_eq!(report.finance.as_ref().map(JobOutcome::count).ok(), Some(1));
        assert_eq!(remote.count(Collection::Customers).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn a_failed_write_does_not_stop_the_other_jobs() {
        let local = MemoryLocalCache::new()
            .with(EntityKind::Customer, customers(2))
            .with(EntityKind::Product, vec![json!({ "id": "prod-1", "type": "voucher", "count": 10 })])
            .with(EntityKind::Appointment, vec![json!({ "id": "appt-1", "customerId": "cust-0" })])
            .with(EntityKind::Finance, vec![json!({ "id": "fin-1", "amount": 1 })]);

        let mut remote = MockRemoteStore::new();

        remote.expect_existing_ids().returning(|_, _| Ok(Vec::new()));
        remote
            .expect_insert_many()
            .times(4)
            .returning(|collection, records, _| match collection {
                Collection::Customers => Err(StoreError::driver("connection reset")),
                _ => Ok(records.len() as u64),
            });

        let engine = MigrationEngine::new(Arc::new(local), Arc::new(remote));
        let report = engine.migrate_all(DuplicatePolicy::default()).await;

        assert!(!report.is_complete_success());
        assert!(matches!(
            report.customers,
            Err(MigrationJobError::RemoteWrite {
                kind: EntityKind::Customer,
                ..
            })
        ));

        for kind in [EntityKind::Product, EntityKind::Appointment, EntityKind::Finance] {
            assert_eq!(
                report.get(kind).as_ref().map(JobOutcome::count).ok(),
                Some(1),
                "{kind} should still migrate"
            );
        }

        let error = report.summaries().first().and_then(|s| s.error.clone());

        assert!(
            error.is_some_and(|e| e.contains("connection reset")),
            "remote message is surfaced"
        );
    }

    #[tokio::test]
    async fn a_failed_lookup_fails_only_that_job() {
        let local = MemoryLocalCache::new()
            .with(EntityKind::Customer, customers(1))
            .with(EntityKind::Product, vec![json!({ "id": "prod-1" })]);

        let mut remote = MockRemoteStore::new();

        remote
            .expect_existing_ids()
            .returning(|collection, _| match collection {
                Collection::Products => Err(StoreError::driver("timeout")),
                _ => Ok(Vec::new()),
            });
        remote
            .expect_insert_many()
            .times(1)
            .returning(|_, records, _| Ok(records.len() as u64));

        let engine = MigrationEngine::new(Arc::new(local), Arc::new(remote));
        let report = engine.migrate_all(DuplicatePolicy::SkipExisting).await;

        assert!(report.customers.is_ok());
        assert!(matches!(
            report.products,
            Err(MigrationJobError::RemoteLookup {
                kind: EntityKind::Product,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn unreadable_local_buckets_fail_only_that_job() {
        let mut local = MockLocalCache::new();

        local.expect_read_all().returning(|kind| match kind {
            EntityKind::Appointment => Err(CacheError::NotAList {
                bucket: kind.bucket(),
            }),
            _ => Ok(Vec::new()),
        });

        let engine = MigrationEngine::new(Arc::new(local), Arc::new(MockRemoteStore::new()));
        let report = engine.migrate_all(DuplicatePolicy::default()).await;

        assert!(report.customers.is_ok());
        assert!(report.finance.is_ok());
        assert!(matches!(
            report.appointments,
            Err(MigrationJobError::LocalRead {
                kind: EntityKind::Appointment,
                ..
            })
        ));
    }
}
