//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        finance::{FinanceService, RemoteFinanceService},
        history::{HistoryService, RemoteHistoryService},
        ledger::{LedgerService, RemoteLedgerService},
        migration::{MigrationEngine, MigrationService},
    },
    stores::{JsonFileCache, LocalCache, PgRemoteStore, RemoteStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub local: Arc<dyn LocalCache>,
    pub remote: Arc<dyn RemoteStore>,
    pub migration: Arc<dyn MigrationService>,
    pub ledger: Arc<dyn LedgerService>,
    pub finance: Arc<dyn FinanceService>,
    pub history: Arc<dyn HistoryService>,
}

impl AppContext {
    /// Wire every service over the given stores.
    #[must_use]
    pub fn new(local: Arc<dyn LocalCache>, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            migration: Arc::new(MigrationEngine::new(local.clone(), remote.clone())),
            ledger: Arc::new(RemoteLedgerService::new(remote.clone())),
            finance: Arc::new(RemoteFinanceService::new(remote.clone())),
            history: Arc::new(RemoteHistoryService::new(remote.clone())),
            local,
            remote,
        }
    }

    /// Build application context from a database URL and cache directory.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(
        database_url: &str,
        cache_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(database_url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(
            Arc::new(JsonFileCache::new(cache_dir)),
            Arc::new(PgRemoteStore::new(Db::new(pool))),
        ))
    }
}
