use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::{
    config::DEFAULT_CACHE_TTL_SECS,
    error::CacheError,
    management::{CacheEntry, CacheStore},
};

/// Single-key, time-boxed JSON cache in front of a [`CacheStore`].
///
/// Expiry is lazy: a stale entry is deleted by the read that finds it. There
/// is no background sweep and no size bound.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl Cache {
    /// Cache with the default one hour TTL.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_ttl(store, Duration::seconds(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn with_ttl(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up a value that is younger than the TTL.
    ///
    /// # Arguments
    ///
    /// * `key` - Cache key, e.g. `top_tracks_long_term_50`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` - The entry exists and is still fresh
    /// - `Ok(None)` - No entry, or a stale one that has just been deleted
    /// - `Err(CacheError)` - The store failed or the stored text is not JSON
    pub async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let Some(entry) = self.store.find(key).await? else {
            return Ok(None);
        };

        if Utc::now() - entry.created_at > self.ttl {
            self.store.delete(key).await?;
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&entry.value)?))
    }

    /// Stores `value` under `key`, stamped with the current time. Replaces
    /// any previous entry for the key.
    pub async fn set(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        self.store
            .upsert(CacheEntry {
                key: key.to_string(),
                value: serde_json::to_string(value)?,
                created_at: Utc::now(),
            })
            .await
    }

    /// Deletes the entry. A missing key is not an error.
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key).await
    }
}
