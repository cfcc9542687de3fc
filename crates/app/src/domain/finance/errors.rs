//! Finance service errors.

use thiserror::Error;

use crate::stores::StoreError;

#[derive(Debug, Error)]
pub enum FinanceServiceError {
    #[error("failed to read finance records: {0}")]
    Store(#[from] StoreError),
}
