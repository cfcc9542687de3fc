//! Store errors.

use std::{io, path::PathBuf};

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Remote store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    AlreadyExists,

    #[error("record not found")]
    NotFound,

    #[error("related record not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error: {0}")]
    Sql(#[source] Error),

    #[error("failed to encode record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
impl StoreError {
    /// A driver-level failure carrying `message`.
    pub(crate) fn driver(message: &str) -> Self {
        Self::Sql(Error::Protocol(message.to_string()))
    }
}

/// Local cache errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to access cache bucket '{bucket}' at {path}: {source}")]
    Io {
        bucket: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cache bucket '{bucket}' is not valid JSON: {source}")]
    Malformed {
        bucket: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache bucket '{bucket}' does not hold a list of records")]
    NotAList { bucket: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(StoreError::from(Error::RowNotFound), StoreError::NotFound));
    }

    #[test]
    fn other_sql_errors_keep_their_message() {
        let error = StoreError::from(Error::PoolTimedOut);

        assert!(matches!(error, StoreError::Sql(_)));
        assert!(error.to_string().starts_with("storage error: "));
    }
}
