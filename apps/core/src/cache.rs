//! In-process history cache with per-entry expiry.
//!
//! Stands in for an external key-value cache behind the [`HistoryCache`]
//! contract. Entries expire after a fixed TTL; expired entries are dropped
//! lazily on read and swept on write.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::engine::traits::HistoryCache;
use crate::error::{AppError, Result};
use crate::models::ChatMessage;

struct CacheEntry {
    expires_at: Instant,
    history: Vec<ChatMessage>,
}

#[derive(Default)]
pub struct MemoryTtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryTtlCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryCache for MemoryTtlCache {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<ChatMessage>>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Cache("cache mutex poisoned".to_string()))?;

        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.history.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn store(&self, key: &str, history: &[ChatMessage], ttl: Duration) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Cache("cache mutex poisoned".to_string()))?;

        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                expires_at: now + ttl,
                history: history.to_vec(),
            },
        );
        Ok(())
    }
}
