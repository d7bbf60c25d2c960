//! Session history with a write-through cache.
//!
//! The durable store is authoritative; the fast cache holds a transient copy
//! capped at the configured number of turns. Writes go durable-first, then
//! cache, and a failure of either write surfaces to the caller: silently
//! losing history would corrupt future context windows.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::engine::traits::{HistoryCache, SessionStore};
use crate::error::{AppError, Result};
use crate::models::ChatMessage;

pub struct SessionHistory {
    sessions: Arc<dyn SessionStore>,
    cache: Arc<dyn HistoryCache>,
    key_prefix: String,
    limit: usize,
    ttl: Duration,
}

impl SessionHistory {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        cache: Arc<dyn HistoryCache>,
        key_prefix: &str,
        limit: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            sessions,
            cache,
            key_prefix: key_prefix.to_string(),
            limit,
            ttl,
        }
    }

    fn key(&self, session_id: &str) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }

    /// Returns the most recent turns for a session: cache first, durable
    /// store on a miss (repopulating the cache). A cache read failure is a
    /// miss, not an error; a missing session is `NotFound`.
    pub async fn get(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let key = self.key(session_id);

        match self.cache.fetch(&key).await {
            Ok(Some(history)) => return Ok(history),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, session_id, "history cache read failed, using durable store");
            }
        }

        let session = self
            .sessions
            .fetch_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("session {} not found", session_id)))?;

        let mut history = session.history.0;
        if history.len() > self.limit {
            history = history.split_off(history.len() - self.limit);
        }

        if let Err(e) = self.cache.store(&key, &history, self.ttl).await {
            warn!(error = %e, session_id, "failed to repopulate history cache");
        }
        Ok(history)
    }

    /// Persists a session's history, truncated to the configured limit:
    /// durable store first, then the cache. Errors from either write
    /// propagate. Returns the truncated history as written.
    pub async fn put(
        &self,
        session_id: &str,
        mut history: Vec<ChatMessage>,
    ) -> Result<Vec<ChatMessage>> {
        if history.len() > self.limit {
            history.drain(..history.len() - self.limit);
        }

        self.sessions.update_history(session_id, &history).await?;
        self.cache
            .store(&self.key(session_id), &history, self.ttl)
            .await?;
        Ok(history)
    }
}
