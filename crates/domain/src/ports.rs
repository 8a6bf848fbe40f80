//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external
//! systems. Adapters implement them to connect to real infrastructure:
//! the blog REST API, the local cache, and the admin session state.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::{Post, PostDraft};

/// Error type for catalog read operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("no post with slug '{0}'")]
    NotFound(String),
    #[error("malformed post record '{id}': {message}")]
    MalformedPost { id: String, message: String },
}

/// Port for reading posts from the blog API
#[async_trait]
pub trait PostCatalog: Send + Sync {
    /// Fetch the full post collection
    async fn fetch_posts(&self) -> Result<Vec<Post>, CatalogError>;

    /// Fetch a single post by slug
    async fn fetch_post(&self, slug: &str) -> Result<Post, CatalogError>;
}

/// Error type for admin write operations
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("no post with id '{0}'")]
    NotFound(String),
}

/// Port for the admin write endpoints
#[async_trait]
pub trait PostEditor: Send + Sync {
    /// Create a post; the server assigns the id
    async fn create_post(&self, draft: &PostDraft) -> Result<Post, EditorError>;

    /// Replace a post by id
    async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, EditorError>;

    /// Delete a post by id
    async fn delete_post(&self, id: &str) -> Result<(), EditorError>;
}

/// Error type for cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Record of a completed cache sync
#[derive(Debug, Clone)]
pub struct SyncRecord {
    /// Unique record ID
    pub id: Uuid,
    /// When the sync completed
    pub synced_at: OffsetDateTime,
    /// Posts in the cache after the sync
    pub post_count: usize,
    /// Posts whose content digest changed (or were new) in this sync
    pub changed: usize,
}

/// Port for the local post cache
#[async_trait]
pub trait PostCache: Send + Sync {
    /// Replace the cached collection and record the sync
    async fn store_posts(
        &self,
        posts: &[Post],
        synced_at: OffsetDateTime,
    ) -> Result<SyncRecord, CacheError>;

    /// Load the cached collection (empty if never synced)
    async fn load_posts(&self) -> Result<Vec<Post>, CacheError>;

    /// The most recent sync, if any
    async fn last_sync(&self) -> Result<Option<SyncRecord>, CacheError>;
}

/// Error type for session state operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Storage(String),
}

/// Port for the admin session gate
///
/// The gate compares a submitted credential pair against an injected
/// expected pair and keeps an authenticated flag in ephemeral session
/// state. It is a convenience gate for the admin commands, not a
/// security control.
pub trait SessionGate: Send + Sync {
    /// Check the credential pair; on a match the session becomes
    /// authenticated and `true` comes back
    fn login(&self, email: &str, password: &str) -> Result<bool, SessionError>;

    /// Whether the session is currently authenticated
    fn is_authenticated(&self) -> Result<bool, SessionError>;

    /// Drop the authenticated flag
    fn logout(&self) -> Result<(), SessionError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
