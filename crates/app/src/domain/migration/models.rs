//! Migration models.

use serde::Serialize;
use tally::entities::EntityKind;
use uuid::Uuid;

use crate::domain::migration::errors::MigrationJobError;

/// How records already present remotely are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Skip records whose id already exists remotely, or earlier in the batch.
    #[default]
    SkipExisting,

    /// Insert every record unconditionally; repeated runs duplicate rows.
    Insert,
}

/// Counters for one entity job that reached the remote store step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    /// Records read from the local bucket.
    pub read: usize,

    /// Records excluded as malformed.
    pub rejected: usize,

    /// Records skipped as already migrated.
    pub skipped: usize,

    /// Records inserted remotely.
    pub inserted: u64,
}

/// Successful end state of one entity job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The local bucket was absent or empty; nothing was written.
    NoOp,

    /// The local bucket was processed.
    Migrated(JobSummary),

    /// The kind was left out of the run.
    NotSelected,
}

impl JobOutcome {
    /// Number of records inserted remotely.
    #[must_use]
    pub fn count(&self) -> u64 {
        match self {
            Self::NoOp | Self::NotSelected => 0,
            Self::Migrated(summary) => summary.inserted,
        }
    }
}

/// End state of one entity job.
pub type JobResult = Result<JobOutcome, MigrationJobError>;

/// Outcome of one migration run, one independent result per entity kind.
#[derive(Debug)]
pub struct MigrationReport {
    /// Batch id every row inserted by this run is tagged with.
    pub batch: Uuid,

    pub customers: JobResult,
    pub products: JobResult,
    pub appointments: JobResult,
    pub finance: JobResult,
}

impl MigrationReport {
    /// The result for one entity kind.
    #[must_use]
    pub fn get(&self, kind: EntityKind) -> &JobResult {
        match kind {
            EntityKind::Customer => &self.customers,
            EntityKind::Product => &self.products,
            EntityKind::Appointment => &self.appointments,
            EntityKind::Finance => &self.finance,
        }
    }

    /// Results in migration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &JobResult)> {
        EntityKind::MIGRATION_ORDER
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
    }

    /// Whether every job succeeded.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.iter().all(|(_, result)| result.is_ok())
    }

    /// Flat per-entity summaries, in migration order.
    #[must_use]
    pub fn summaries(&self) -> Vec<EntitySummary> {
        self.iter()
            .map(|(entity, result)| match result {
                Ok(outcome) => EntitySummary {
                    entity,
                    success: true,
                    count: outcome.count(),
                    error: None,
                },
                Err(error) => EntitySummary {
                    entity,
                    success: false,
                    count: 0,
                    error: Some(error.to_string()),
                },
            })
            .collect()
    }
}

/// `{ success, count, error }` view of one entity job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub entity: EntityKind,
    pub success: bool,
    pub count: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Record counts per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub customers: u64,
    pub products: u64,
    pub appointments: u64,
    pub finance: u64,
}

impl EntityCounts {
    #[must_use]
    pub fn get(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Customer => self.customers,
            EntityKind::Product => self.products,
            EntityKind::Appointment => self.appointments,
            EntityKind::Finance => self.finance,
        }
    }

    pub fn set(&mut self, kind: EntityKind, count: u64) {
        let slot = match kind {
            EntityKind::Customer => &mut self.customers,
            EntityKind::Product => &mut self.products,
            EntityKind::Appointment => &mut self.appointments,
            EntityKind::Finance => &mut self.finance,
        };

        *slot = count;
    }

    /// Whether any kind has at least one record.
    #[must_use]
    pub fn any(&self) -> bool {
        EntityKind::MIGRATION_ORDER
            .into_iter()
            .any(|kind| self.get(kind) > 0)
    }
}

/// Local and remote record counts, as seen by the prober.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    pub has_local_data: bool,
    pub has_remote_data: bool,
    pub local_counts: EntityCounts,
    pub remote_counts: EntityCounts,
}

impl MigrationStatus {
    #[must_use]
    pub fn new(local_counts: EntityCounts, remote_counts: EntityCounts) -> Self {
        Self {
            has_local_data: local_counts.any(),
            has_remote_data: remote_counts.any(),
            local_counts,
            remote_counts,
        }
    }

    /// What the operator should do next.
    #[must_use]
    pub fn advice(&self) -> MigrationAdvice {
        match (self.has_local_data, self.has_remote_data) {
            (true, false) => MigrationAdvice::Migrate,
            (true, true) => MigrationAdvice::ClearLocal,
            (false, true) => MigrationAdvice::Complete,
            (false, false) => MigrationAdvice::Empty,
        }
    }
}

/// Next step suggested by a [`MigrationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationAdvice {
    /// Only local data exists: run the migration.
    Migrate,

    /// Both sides hold data: verify, then clear the local cache.
    ClearLocal,

    /// Only remote data exists: migration is complete.
    Complete,

    /// Neither side holds data.
    Empty,
}

#[cfg(test)]
mod tests {
    use crate::stores::StoreError;

    use super::*;

    fn counts(customers: u64, finance: u64) -> EntityCounts {
        EntityCounts {
            customers,
            finance,
            ..EntityCounts::default()
        }
    }

    #[test]
    fn advice_follows_which_side_has_data() {
        assert_eq!(
            MigrationStatus::new(counts(3, 0), counts(0, 0)).advice(),
            MigrationAdvice::Migrate
        );
        assert_eq!(
            MigrationStatus::new(counts(3, 0), counts(0, 1)).advice(),
            MigrationAdvice::ClearLocal
        );
        assert_eq!(
            MigrationStatus::new(counts(0, 0), counts(3, 0)).advice(),
            MigrationAdvice::Complete
        );
        assert_eq!(
            MigrationStatus::new(EntityCounts::default(), EntityCounts::default()).advice(),
            MigrationAdvice::Empty
        );
    }

    #[test]
    fn summaries_flatten_job_results() {
        let report = MigrationReport {
            batch: Uuid::now_v7(),
            customers: Ok(JobOutcome::Migrated(JobSummary {
                read: 5,
                inserted: 5,
                ..JobSummary::default()
            })),
            products: Ok(JobOutcome::NoOp),
            appointments: Err(MigrationJobError::RemoteWrite {
                kind: EntityKind::Appointment,
                source: StoreError::driver("quota exceeded"),
            }),
            finance: Ok(JobOutcome::NoOp),
        };

        let summaries = report.summaries();

        assert!(!report.is_complete_success());
        assert_eq!(
            summaries.first(),
            Some(&EntitySummary {
                entity: EntityKind::Customer,
                success: true,
                count: 5,
                error: None,
            })
        );

        let failed = summaries.get(2);

        assert_eq!(failed.map(|s| s.success), Some(false));
        assert_eq!(failed.map(|s| s.count), Some(0));
        assert!(
            failed
                .and_then(|s| s.error.as_deref())
                .is_some_and(|e| e.contains("quota exceeded")),
            "remote message is carried into the summary"
        );
    }
}
