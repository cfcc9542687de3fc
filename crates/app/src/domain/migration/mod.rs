//! Local-to-remote data migration

pub mod errors;
pub mod models;
pub mod service;
pub mod status;

pub use errors::{MigrationJobError, MigrationServiceError};
pub use models::{
    DuplicatePolicy, EntityCounts, EntitySummary, JobOutcome, JobResult, JobSummary,
    MigrationAdvice, MigrationReport, MigrationStatus,
};
pub use service::*;
pub use status::StatusProber;
