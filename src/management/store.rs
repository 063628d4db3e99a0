//! Backing stores for the response cache.
//!
//! A store is a keyed table of [`CacheEntry`] rows supporting point lookup,
//! upsert-by-key and delete-by-key. Atomicity of a single upsert is the
//! store's job; the cache layer above does no locking.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{error::CacheError, utils};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    /// JSON-encoded payload.
    pub value: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn find(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// Inserts the entry or replaces the one with the same key.
    async fn upsert(&self, entry: CacheEntry) -> Result<(), CacheError>;

    /// Removes the entry. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// One JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    root: PathBuf,
}

impl FileCacheStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    async fn ensure_parent_dir(path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn find(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.entry_path(key)?;
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn upsert(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let path = self.entry_path(&entry.key)?;
        Self::ensure_parent_dir(&path).await?;

        // each writer gets its own temp file; the rename publishes it whole
        let tmp = self
            .root
            .join(format!("{}.{}.json.tmp", entry.key, utils::random_alphanumeric(8)));
        let json = serde_json::to_string(&entry)?;

        let written = match async_fs::write(&tmp, json).await {
            Ok(()) => async_fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        match async_fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn find(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn upsert(&self, entry: CacheEntry) -> Result<(), CacheError> {
        self.entries.lock().await.insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
