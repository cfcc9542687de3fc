//! Migration status prober.

use std::sync::Arc;

use tally::entities::EntityKind;
use tracing::debug;

use crate::{
    domain::migration::{
        errors::MigrationServiceError,
        models::{EntityCounts, MigrationStatus},
    },
    stores::{LocalCache, RemoteStore},
};

/// Counts local and remote records per entity kind. Read-only.
#[derive(Clone)]
pub struct StatusProber {
    local: Arc<dyn LocalCache>,
    remote: Arc<dyn RemoteStore>,
}

impl StatusProber {
    #[must_use]
    pub fn new(local: Arc<dyn LocalCache>, remote: Arc<dyn RemoteStore>) -> Self {
        Self { local, remote }
    }

    /// Count both sides.
    ///
    /// # Errors
    ///
    /// Returns an error if a local bucket cannot be read or a remote count
    /// fails. Failures are never reported as zero.
    pub async fn probe(&self) -> Result<MigrationStatus, MigrationServiceError> {
        let mut local_counts = EntityCounts::default();
        let mut remote_counts = EntityCounts::default();

        for kind in EntityKind::MIGRATION_ORDER {
            let local = self
                .local
                .read_all(kind)
                .await
                .map_err(|source| MigrationServiceError::Cache { kind, source })?;

            let remote = self
                .remote
                .count(kind.collection())
                .await
                .map_err(|source| MigrationServiceError::Store { kind, source })?;

            debug!(%kind, local = local.len(), remote, "probed");

            local_counts.set(kind, u64::try_from(local.len()).unwrap_or(u64::MAX));
            remote_counts.set(kind, remote);
        }

        Ok(MigrationStatus::new(local_counts, remote_counts))
    }
}
