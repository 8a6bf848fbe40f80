//! Sync command - refresh the local post cache from the API

use anyhow::{Context, Result};
use std::path::PathBuf;
use trading_insights_adapters::cache::SqlitePostCache;
use trading_insights_domain::ports::{Clock, PostCache, PostCatalog, SystemClock};

use crate::commands::catalog;
use crate::config::AppConfig;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    let posts = catalog(&config)
        .fetch_posts()
        .await
        .context("Failed to fetch posts from the blog API")?;

    let cache = SqlitePostCache::new(&config.general.cache_db_path)
        .await
        .context("Failed to open the local cache")?;

    let record = cache
        .store_posts(&posts, SystemClock.now())
        .await
        .context("Failed to store posts in the local cache")?;

    tracing::info!(
        count = record.post_count,
        changed = record.changed,
        "Synced post cache"
    );

    println!(
        "Synced {} post(s) into {} ({} changed)",
        record.post_count,
        config.general.cache_db_path.display(),
        record.changed
    );

    Ok(())
}
