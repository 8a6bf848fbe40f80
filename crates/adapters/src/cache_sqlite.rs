//! SQLite post cache implementation

use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::collections::HashMap;
use std::path::Path;
use time::OffsetDateTime;
use trading_insights_domain::content_digest;
use trading_insights_domain::model::{
    Category, Post, format_publish_date, parse_publish_date,
};
use trading_insights_domain::ports::{CacheError, PostCache, SyncRecord};
use uuid::Uuid;

/// SQLite-backed post cache
///
/// Holds the most recent snapshot of the post collection plus a log of
/// syncs. Row order preserves the collection order the API served.
pub struct SqlitePostCache {
    pool: SqlitePool,
}

impl SqlitePostCache {
    /// Create a new SQLite cache, initializing the database if needed
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let db_path = db_path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CacheError::Database(format!("Failed to create directory: {}", e)))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        let cache = Self { pool };
        cache.run_migrations().await?;

        Ok(cache)
    }

    /// Create an in-memory SQLite cache (for testing)
    pub async fn in_memory() -> Result<Self, CacheError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        let cache = Self { pool };
        cache.run_migrations().await?;

        Ok(cache)
    }

    async fn run_migrations(&self) -> Result<(), CacheError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                excerpt TEXT NOT NULL,
                content TEXT NOT NULL,
                category TEXT NOT NULL,
                category_label TEXT NOT NULL,
                featured_image TEXT NOT NULL,
                author TEXT NOT NULL,
                publish_date TEXT NOT NULL,
                reading_time INTEGER NOT NULL,
                featured INTEGER NOT NULL,
                content_digest TEXT NOT NULL,
                position INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CacheError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sync_log (
                id TEXT PRIMARY KEY,
                synced_at TEXT NOT NULL,
                post_count INTEGER NOT NULL,
                changed INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CacheError::Database(e.to_string()))?;

        Ok(())
    }

    async fn stored_digests(&self) -> Result<HashMap<String, String>, CacheError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, content_digest FROM posts")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        Ok(rows.into_iter().collect())
    }
}

#[async_trait]
impl PostCache for SqlitePostCache {
    async fn store_posts(
        &self,
        posts: &[Post],
        synced_at: OffsetDateTime,
    ) -> Result<SyncRecord, CacheError> {
        let previous = self.stored_digests().await?;

        let mut changed = 0usize;
        let digests: Vec<String> = posts
            .iter()
            .map(|post| {
                let digest = content_digest(post);
                if previous.get(&post.id) != Some(&digest) {
                    changed += 1;
                }
                digest
            })
            .collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM posts")
            .execute(&mut *tx)
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        for (position, (post, digest)) in posts.iter().zip(&digests).enumerate() {
            sqlx::query(
                r#"
                INSERT INTO posts
                (id, slug, title, excerpt, content, category, category_label,
                 featured_image, author, publish_date, reading_time, featured,
                 content_digest, position)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&post.id)
            .bind(&post.slug)
            .bind(&post.title)
            .bind(&post.excerpt)
            .bind(&post.content)
            .bind(post.category.id())
            .bind(&post.category_label)
            .bind(&post.featured_image)
            .bind(&post.author)
            .bind(format_publish_date(post.publish_date))
            .bind(post.reading_time as i64)
            .bind(post.featured as i64)
            .bind(digest)
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;
        }

        let record = SyncRecord {
            id: Uuid::new_v4(),
            synced_at,
            post_count: posts.len(),
            changed,
        };

        let synced_at_str = record
            .synced_at
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;

        sqlx::query("INSERT INTO sync_log (id, synced_at, post_count, changed) VALUES (?, ?, ?, ?)")
            .bind(record.id.to_string())
            .bind(&synced_at_str)
            .bind(record.post_count as i64)
            .bind(record.changed as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| CacheError::Database(e.to_string()))?;

        Ok(record)
    }

    async fn load_posts(&self) -> Result<Vec<Post>, CacheError> {
        type Row = (
            String,
            String,
            String,
            String,
            String,
            String,
            String,
            String,
            String,
            String,
            i64,
            i64,
        );

        let rows: Vec<Row> = sqlx::query_as(
            r#"
            SELECT id, slug, title, excerpt, content, category, category_label,
                   featured_image, author, publish_date, reading_time, featured
            FROM posts ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CacheError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let (
                    id,
                    slug,
                    title,
                    excerpt,
                    content,
                    category_id,
                    category_label,
                    featured_image,
                    author,
                    publish_date_str,
                    reading_time,
                    featured,
                ) = row;

                let category = Category::from_id(&category_id).ok_or_else(|| {
                    CacheError::Serialization(format!("unknown category '{}'", category_id))
                })?;

                let publish_date = parse_publish_date(&publish_date_str)
                    .map_err(|e| CacheError::Serialization(e.to_string()))?;

                Ok(Post {
                    id,
                    slug,
                    title,
                    excerpt,
                    content,
                    category,
                    category_label,
                    featured_image,
                    author,
                    publish_date,
                    reading_time: reading_time as u32,
                    featured: featured != 0,
                })
            })
            .collect()
    }

    async fn last_sync(&self) -> Result<Option<SyncRecord>, CacheError> {
        let row: Option<(String, String, i64, i64)> = sqlx::query_as(
            "SELECT id, synced_at, post_count, changed FROM sync_log ORDER BY rowid DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CacheError::Database(e.to_string()))?;

        match row {
            Some((id, synced_at_str, post_count, changed)) => {
                let id = Uuid::parse_str(&id)
                    .map_err(|e| CacheError::Serialization(e.to_string()))?;

                let synced_at = OffsetDateTime::parse(
                    &synced_at_str,
                    &time::format_description::well_known::Rfc3339,
                )
                .map_err(|e| CacheError::Serialization(e.to_string()))?;

                Ok(Some(SyncRecord {
                    id,
                    synced_at,
                    post_count: post_count as usize,
                    changed: changed as usize,
                }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn post(slug: &str, content: &str) -> Post {
        Post {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.replace('-', " "),
            excerpt: "excerpt".to_string(),
            content: content.to_string(),
            category: Category::Forex,
            category_label: Category::Forex.label().to_string(),
            featured_image: String::new(),
            author: "Research Desk".to_string(),
            publish_date: date!(2024 - 01 - 01),
            reading_time: 3,
            featured: true,
        }
    }

    #[tokio::test]
    async fn store_and_load_roundtrip_preserves_order() {
        let cache = SqlitePostCache::in_memory().await.unwrap();
        let posts = vec![post("zeta", "z"), post("alpha", "a"), post("mid", "m")];

        cache
            .store_posts(&posts, OffsetDateTime::now_utc())
            .await
            .unwrap();
        let loaded = cache.load_posts().await.unwrap();

        assert_eq!(loaded, posts);
    }

    #[tokio::test]
    async fn empty_cache_loads_empty() {
        let cache = SqlitePostCache::in_memory().await.unwrap();
        assert!(cache.load_posts().await.unwrap().is_empty());
        assert!(cache.last_sync().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn changed_counts_new_and_edited_posts() {
        let cache = SqlitePostCache::in_memory().await.unwrap();

        let first = cache
            .store_posts(&[post("a", "one"), post("b", "two")], OffsetDateTime::now_utc())
            .await
            .unwrap();
        assert_eq!(first.post_count, 2);
        assert_eq!(first.changed, 2, "everything is new on first sync");

        // Same content: nothing changed.
        let second = cache
            .store_posts(&[post("a", "one"), post("b", "two")], OffsetDateTime::now_utc())
            .await
            .unwrap();
        assert_eq!(second.changed, 0);

        // One edit and one new post.
        let third = cache
            .store_posts(
                &[post("a", "edited"), post("b", "two"), post("c", "three")],
                OffsetDateTime::now_utc(),
            )
            .await
            .unwrap();
        assert_eq!(third.post_count, 3);
        assert_eq!(third.changed, 2);
    }

    #[tokio::test]
    async fn last_sync_returns_most_recent_record() {
        let cache = SqlitePostCache::in_memory().await.unwrap();

        cache
            .store_posts(&[post("a", "one")], OffsetDateTime::now_utc())
            .await
            .unwrap();
        let latest = cache
            .store_posts(&[post("a", "one"), post("b", "two")], OffsetDateTime::now_utc())
            .await
            .unwrap();

        let recorded = cache.last_sync().await.unwrap().unwrap();
        assert_eq!(recorded.id, latest.id);
        assert_eq!(recorded.post_count, 2);
    }

    #[tokio::test]
    async fn persists_to_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let db_path = dir.path().join("cache").join("posts.sqlite");

        {
            let cache = SqlitePostCache::new(&db_path).await.unwrap();
            cache
                .store_posts(&[post("a", "one")], OffsetDateTime::now_utc())
                .await
                .unwrap();
        }

        let reopened = SqlitePostCache::new(&db_path).await.unwrap();
        let loaded = reopened.load_posts().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].slug, "a");
        assert!(loaded[0].featured);
    }
}
