//! Migration errors.

use tally::entities::EntityKind;
use thiserror::Error;

use crate::stores::{CacheError, StoreError};

/// Why a single entity job failed.
#[derive(Debug, Error)]
pub enum MigrationJobError {
    #[error("failed to read local {kind}: {source}")]
    LocalRead {
        kind: EntityKind,
        #[source]
        source: CacheError,
    },

    #[error("failed to look up existing remote {kind}: {source}")]
    RemoteLookup {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },

    #[error("failed to write remote {kind}: {source}")]
    RemoteWrite {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },
}

impl MigrationJobError {
    /// Entity kind the failed job was migrating.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::LocalRead { kind, .. }
            | Self::RemoteLookup { kind, .. }
            | Self::RemoteWrite { kind, .. } => *kind,
        }
    }
}

/// Migration service errors outside individual jobs.
#[derive(Debug, Error)]
pub enum MigrationServiceError {
    #[error("failed to access local {kind}: {source}")]
    Cache {
        kind: EntityKind,
        #[source]
        source: CacheError,
    },

    #[error("failed to count remote {kind}: {source}")]
    Store {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },
}
