//! Local record cache.
//!
//! The console keeps one ordered list of client-shaped records per entity
//! kind, each under a named bucket (`crm-customers`, `crm-products`, ...).

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tally::entities::EntityKind;
use tokio::{fs, sync::RwLock};

use crate::stores::errors::CacheError;

/// Local key-value cache of entity buckets.
#[automock]
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// Every record in the kind's bucket; an absent bucket reads as empty.
    async fn read_all(&self, kind: EntityKind) -> Result<Vec<Value>, CacheError>;

    /// Replace the kind's bucket.
    async fn write_all(&self, kind: EntityKind, records: Vec<Value>) -> Result<(), CacheError>;

    /// Remove the kind's bucket.
    async fn clear(&self, kind: EntityKind) -> Result<(), CacheError>;
}

/// A [`LocalCache`] keeping each bucket as a JSON file in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the bucket files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.bucket()))
    }

    fn io_error(&self, kind: EntityKind, source: std::io::Error) -> CacheError {
        CacheError::Io {
            bucket: kind.bucket(),
            path: self.path(kind),
            source,
        }
    }
}

#[async_trait]
impl LocalCache for JsonFileCache {
    async fn read_all(&self, kind: EntityKind) -> Result<Vec<Value>, CacheError> {
        let contents = match fs::read_to_string(self.path(kind)).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(self.io_error(kind, error)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parsed: Value =
            serde_json::from_str(&contents).map_err(|source| CacheError::Malformed {
                bucket: kind.bucket(),
                source,
            })?;

        match parsed {
            Value::Array(records) => Ok(records),
            Value::Null => Ok(Vec::new()),
            _ => Err(CacheError::NotAList {
                bucket: kind.bucket(),
            }),
        }
    }

    async fn write_all(&self, kind: EntityKind, records: Vec<Value>) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|error| self.io_error(kind, error))?;

        let contents = serde_json::to_string_pretty(&Value::Array(records)).map_err(|source| {
            CacheError::Malformed {
                bucket: kind.bucket(),
                source,
            }
        })?;

        fs::write(self.path(kind), contents)
            .await
            .map_err(|error| self.io_error(kind, error))
    }

    async fn clear(&self, kind: EntityKind) -> Result<(), CacheError> {
        match fs::remove_file(self.path(kind)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error(kind, error)),
        }
    }
}

/// A [`LocalCache`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryLocalCache {
    buckets: RwLock<FxHashMap<EntityKind, Vec<Value>>>,
}

impl MemoryLocalCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style bucket seeding.
    #[must_use]
    pub fn with(mut self, kind: EntityKind, records: Vec<Value>) -> Self {
        self.buckets.get_mut().insert(kind, records);
        self
    }
}

#[async_trait]
impl LocalCache for MemoryLocalCache {
    async fn read_all(&self, kind: EntityKind) -> Result<Vec<Value>, CacheError> {
        Ok(self
            .buckets
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn write_all(&self, kind: EntityKind, records: Vec<Value>) -> Result<(), CacheError> {
        self.buckets.write().await.insert(kind, records);

        Ok(())
    }

    async fn clear(&self, kind: EntityKind) -> Result<(), CacheError> {
        self.buckets.write().await.remove(&kind);

        Ok(())
    }
}
