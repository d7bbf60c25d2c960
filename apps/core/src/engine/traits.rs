use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Article, ChatMessage, Package, Session};

/// Read-only contract over the educational-content store.
#[async_trait]
pub trait ArticleStore: Send + Sync + 'static {
    /// Published articles whose title, excerpt, or body contains `term`
    /// (case-insensitive), newest first with unpublished dates last.
    async fn search_published(&self, term: &str, limit: u32) -> Result<Vec<Article>>;
}

/// Read-only contract over the package store.
#[async_trait]
pub trait PackageStore: Send + Sync + 'static {
    /// Active packages whose type matches "expedition" (case-insensitive
    /// substring), optionally narrowed to those whose region, heading, title,
    /// or slug contains `location`.
    async fn expedition_packages(&self, location: Option<&str>) -> Result<Vec<Package>>;

    /// Active packages of any type, capped at `limit`.
    async fn active_packages(&self, limit: u32) -> Result<Vec<Package>>;

    /// A single active package by id.
    async fn package_by_id(&self, id: &str) -> Result<Option<Package>>;
}

/// Contract over the durable session store.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn create_session(&self, user_id: &str, title: Option<String>) -> Result<Session>;

    async fn fetch_session(&self, session_id: &str) -> Result<Option<Session>>;

    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>>;

    /// Replaces a session's history. Fails with `NotFound` when the session
    /// no longer exists, so the caller never caches history for a session
    /// the durable store does not own.
    async fn update_history(&self, session_id: &str, history: &[ChatMessage]) -> Result<()>;
}

/// Contract over the fast key-value cache in front of session history.
#[async_trait]
pub trait HistoryCache: Send + Sync + 'static {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<ChatMessage>>>;

    async fn store(&self, key: &str, history: &[ChatMessage], ttl: Duration) -> Result<()>;
}

/// Contract over the generative text backend: prompt in, text out. Replies
/// are untrusted free text; callers parse and bounds-check anything they
/// read back out of them.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String>;
}
