//! Tags command - the site-wide tag cloud

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::args::TagsArgs;
use crate::commands::{load_collection, vocabulary};
use crate::config::AppConfig;

pub async fn execute(args: TagsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    let posts = load_collection(&config, args.offline).await?;

    let limit = args.limit.unwrap_or(config.content.cloud_limit);
    let counts = vocabulary(&config).tag_counts(&posts, limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    if counts.is_empty() {
        println!("No tags matched");
        return Ok(());
    }

    println!("Popular topics");
    println!();
    for entry in &counts {
        println!("{:>4}  {}", entry.count, entry.tag);
    }

    Ok(())
}
