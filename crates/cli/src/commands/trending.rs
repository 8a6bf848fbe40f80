//! Trending command - featured posts first, then newest

use anyhow::{Context, Result};
use std::path::PathBuf;
use trading_insights_domain::usecases::trending;

use crate::args::TrendingArgs;
use crate::commands::load_collection;
use crate::config::AppConfig;

pub async fn execute(args: TrendingArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    let posts = load_collection(&config, args.offline).await?;

    let limit = args.limit.unwrap_or(config.content.trending_limit);
    let ranked = trending(&posts, limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No posts yet");
        return Ok(());
    }

    println!("Trending now");
    println!();
    for (index, post) in ranked.iter().enumerate() {
        println!(
            "{:02}  {}{}",
            index + 1,
            post.title,
            if post.featured { "  [featured]" } else { "" }
        );
        println!("    {} | {} min", post.category_label, post.reading_time);
    }

    Ok(())
}
