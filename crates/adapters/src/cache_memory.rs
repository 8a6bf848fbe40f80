//! In-memory post cache for testing and offline use

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use time::OffsetDateTime;
use trading_insights_domain::content_digest;
use trading_insights_domain::model::Post;
use trading_insights_domain::ports::{CacheError, PostCache, SyncRecord};
use uuid::Uuid;

/// In-memory post cache implementation
pub struct InMemoryPostCache {
    posts: RwLock<Vec<Post>>,
    syncs: RwLock<Vec<SyncRecord>>,
}

impl InMemoryPostCache {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            syncs: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostCache for InMemoryPostCache {
    async fn store_posts(
        &self,
        posts: &[Post],
        synced_at: OffsetDateTime,
    ) -> Result<SyncRecord, CacheError> {
        let mut stored = self
            .posts
            .write()
            .map_err(|e| CacheError::Database(e.to_string()))?;

        let previous: HashMap<&str, String> = stored
            .iter()
            .map(|p| (p.id.as_str(), content_digest(p)))
            .collect();

        let changed = posts
            .iter()
            .filter(|p| previous.get(p.id.as_str()) != Some(&content_digest(p)))
            .count();

        *stored = posts.to_vec();

        let record = SyncRecord {
            id: Uuid::new_v4(),
            synced_at,
            post_count: posts.len(),
            changed,
        };

        self.syncs
            .write()
            .map_err(|e| CacheError::Database(e.to_string()))?
            .push(record.clone());

        Ok(record)
    }

    async fn load_posts(&self) -> Result<Vec<Post>, CacheError> {
        let posts = self
            .posts
            .read()
            .map_err(|e| CacheError::Database(e.to_string()))?;
        Ok(posts.clone())
    }

    async fn last_sync(&self) -> Result<Option<SyncRecord>, CacheError> {
        let syncs = self
            .syncs
            .read()
            .map_err(|e| CacheError::Database(e.to_string()))?;
        Ok(syncs.last().cloned())
    }
}
