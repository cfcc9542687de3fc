//! History service errors.

use tally::mapping::MappingError;
use thiserror::Error;

use crate::stores::StoreError;

#[derive(Debug, Error)]
pub enum HistoryServiceError {
    #[error("customer not found")]
    CustomerNotFound,

    #[error("failed to replace history: {0}")]
    Store(#[source] StoreError),

    #[error("invalid history record: {0}")]
    Mapping(#[from] MappingError),
}

impl From<StoreError> for HistoryServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::CustomerNotFound,
            other => Self::Store(other),
        }
    }
}
