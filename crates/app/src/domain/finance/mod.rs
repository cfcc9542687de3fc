//! Finance reporting

pub mod errors;
pub mod service;

pub use errors::FinanceServiceError;
pub use service::*;
