//! Ledger service errors.

use thiserror::Error;

use crate::stores::StoreError;

#[derive(Debug, Error)]
pub enum LedgerServiceError {
    #[error("customer not found")]
    CustomerNotFound,

    #[error("failed to read ledger events: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for LedgerServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::CustomerNotFound,
            other => Self::Store(other),
        }
    }
}
