//! Show command - a single post with rendered body, tags, and related articles

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use trading_insights_domain::model::format_publish_date;
use trading_insights_domain::ports::PostCatalog;
use trading_insights_domain::usecases::{related_posts, render_html};

use crate::args::ShowArgs;
use crate::commands::{catalog, load_collection, vocabulary};
use crate::config::AppConfig;

pub async fn execute(args: ShowArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    let vocabulary = vocabulary(&config);

    // The full collection backs both offline lookup and related ranking.
    let posts = load_collection(&config, args.offline).await?;

    let post = if args.offline {
        posts
            .iter()
            .find(|p| p.slug == args.slug)
            .cloned()
            .ok_or_else(|| anyhow!("no post with slug '{}' in the local cache", args.slug))?
    } else {
        catalog(&config)
            .fetch_post(&args.slug)
            .await
            .with_context(|| format!("Failed to fetch post '{}'", args.slug))?
    };

    let tags = vocabulary.extract_tags(&post.title, &post.content, config.content.post_tag_limit);
    let html = render_html(&post.content);
    let related = related_posts(&post, &posts, &vocabulary, config.content.related_limit);

    if args.json {
        let payload = serde_json::json!({
            "post": post,
            "tags": tags,
            "html": html,
            "related": related,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!(
        "{} | {} | {} min read | by {}",
        post.category_label,
        format_publish_date(post.publish_date),
        post.reading_time,
        post.author
    );
    if !tags.is_empty() {
        println!("tags: {}", tags.join(", "));
    }
    println!();
    println!("{}", html);

    if !related.is_empty() {
        println!();
        println!("Related articles:");
        for related_post in &related {
            println!("  - {} ({})", related_post.title, related_post.slug);
        }
    }

    Ok(())
}
