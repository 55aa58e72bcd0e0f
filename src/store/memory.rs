//! In-process store
//!
//! A `HashMap` of TTL-stamped entries. Used for local development
//! (`backend = "memory"`) and as the store behind the router tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CacheEntry, KeyValueStore, StoredValue};
use crate::error::Result;

// == Memory Store ==
/// TTL-aware map shared behind a tokio `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Number of entries held, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn fetch(&self, key: &str) -> Result<Option<StoredValue>> {
        let entries = self.entries.read().await;

        let found = entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| StoredValue {
                value: entry.value.clone(),
                ttl: entry.ttl_remaining_secs(),
            });

        match &found {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(found)
    }

    async fn store(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let entry = CacheEntry::new(value.to_string(), Some(ttl_seconds));
        self.entries.write().await.insert(key.to_string(), entry);

        debug!("Cached key '{}' with TTL {}s", key, ttl_seconds);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
