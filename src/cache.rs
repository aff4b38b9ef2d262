use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, ScraperError};

/// String key/value store with per-entry expiry. Values are JSON documents.
#[async_trait]
pub trait EventCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
    /// Returns whether an entry was removed
    async fn remove(&self, key: &str) -> Result<bool>;
    /// Remaining lifetime of a live entry
    async fn time_to_live(&self, key: &str) -> Result<Option<Duration>>;
}

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache; expired entries are evicted when next touched.
#[derive(Clone, Default)]
pub struct InMemoryEventCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl InMemoryEventCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| ScraperError::Cache("cache lock poisoned".into()))
    }

    /// Drops `key` if it has expired; returns the live entry's expiry.
    fn live_expiry(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) -> Option<Instant> {
        let expires_at = entries.get(key)?.expires_at;
        if expires_at <= now {
            debug!("Cache entry '{}' expired", key);
            entries.remove(key);
            return None;
        }
        Some(expires_at)
    }
}

#[async_trait]
impl EventCache for InMemoryEventCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.lock()?;
        if Self::live_expiry(&mut entries, key, Instant::now()).is_none() {
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut entries = self.lock()?;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        debug!("Cached '{}' for {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.lock()?;
        Ok(entries.remove(key).is_some())
    }

    async fn time_to_live(&self, key: &str) -> Result<Option<Duration>> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(Self::live_expiry(&mut entries, key, now).map(|expires_at| expires_at - now))
    }
}
