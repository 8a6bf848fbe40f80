//! CLI command implementations

pub mod admin;
pub mod config;
pub mod doctor;
pub mod posts;
pub mod show;
pub mod sync;
pub mod tags;
pub mod trending;

use anyhow::{Context, Result, bail};
use std::time::Duration;
use trading_insights_adapters::blog_api::HttpPostCatalog;
use trading_insights_adapters::cache::SqlitePostCache;
use trading_insights_domain::model::Post;
use trading_insights_domain::ports::{PostCache, PostCatalog};
use trading_insights_domain::vocabulary::Vocabulary;

use crate::config::AppConfig;

pub(crate) fn catalog(config: &AppConfig) -> HttpPostCatalog {
    HttpPostCatalog::with_timeout(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )
}

pub(crate) fn vocabulary(config: &AppConfig) -> Vocabulary {
    Vocabulary::new(config.content.vocabulary.clone())
}

/// Load the post collection from the API, or from the local cache in
/// offline mode
pub(crate) async fn load_collection(config: &AppConfig, offline: bool) -> Result<Vec<Post>> {
    if offline {
        let cache = SqlitePostCache::new(&config.general.cache_db_path)
            .await
            .context("Failed to open the local cache")?;

        let posts = cache
            .load_posts()
            .await
            .context("Failed to read the local cache")?;

        if posts.is_empty() {
            bail!("The local cache is empty; run `trading-insights sync` first");
        }

        tracing::debug!(count = posts.len(), "Loaded posts from the local cache");
        Ok(posts)
    } else {
        catalog(config)
            .fetch_posts()
            .await
            .context("Failed to fetch posts from the blog API")
    }
}
