//! Customer appointment and purchase history

pub mod errors;
pub mod models;
pub mod service;

pub use errors::HistoryServiceError;
pub use service::*;
