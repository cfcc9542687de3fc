//! Runtime configuration

pub mod cache;
pub mod db;
pub mod observability;

pub use cache::CacheConfig;
pub use db::DatabaseConfig;
pub use observability::{LogFormat, LoggingConfig};
