//! Customer credit ledger

pub mod errors;
pub mod service;

pub use errors::LedgerServiceError;
pub use service::*;
