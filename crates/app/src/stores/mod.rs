//! Record stores

pub mod errors;
pub mod local;
pub mod memory;
pub mod postgres;
pub mod remote;

pub use errors::{CacheError, StoreError};
pub use local::{JsonFileCache, LocalCache, MemoryLocalCache, MockLocalCache};
pub use memory::MemoryRemoteStore;
pub use postgres::PgRemoteStore;
pub use remote::{MockRemoteStore, RemoteStore};
