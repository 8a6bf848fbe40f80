//! Posts command - filtered, searched, and sorted listings

use anyhow::{Context, Result};
use std::path::PathBuf;
use trading_insights_domain::model::format_publish_date;
use trading_insights_domain::usecases::query;

use crate::args::PostsArgs;
use crate::commands::load_collection;
use crate::config::AppConfig;

pub async fn execute(args: PostsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    let posts = load_collection(&config, args.offline).await?;

    let results = query::query(&posts, args.category.as_str(), &args.search, args.sort);

    tracing::info!(
        total = posts.len(),
        matched = results.len(),
        category = args.category.as_str(),
        "Ran listing query"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize posts")?;
        println!("{}", json);
        return Ok(());
    }

    if results.is_empty() {
        println!("No articles found");
        return Ok(());
    }

    println!("{} article(s)", results.len());
    println!();
    for post in &results {
        println!(
            "{}  {:<18} {:>2} min  {}",
            format_publish_date(post.publish_date),
            post.category_label,
            post.reading_time,
            post.title
        );
        println!("            slug: {}", post.slug);
    }

    Ok(())
}
