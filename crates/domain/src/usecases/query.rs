//! Listing queries, related-article ranking, and the trending feed

use serde::{Deserialize, Serialize};

use crate::model::Post;
use crate::vocabulary::{DEFAULT_POST_TAG_LIMIT, Vocabulary};

/// Default number of related articles on a post page
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Default number of posts in the trending feed
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Sort order for listing queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Newest first (the default)
    #[default]
    Recent,
    /// Oldest first
    Oldest,
    /// Shortest read first
    ReadingTime,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Recent => "recent",
            SortBy::Oldest => "oldest",
            SortBy::ReadingTime => "reading-time",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = ParseSortByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(SortBy::Recent),
            "oldest" => Ok(SortBy::Oldest),
            "reading-time" => Ok(SortBy::ReadingTime),
            other => Err(ParseSortByError(other.to_string())),
        }
    }
}

/// Error for unrecognized sort orders at an input boundary
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sort order '{0}', expected recent, oldest, or reading-time")]
pub struct ParseSortByError(String);

/// Filter and sort a post collection for a listing page.
///
/// `category` is a category id or the `all` wildcard; an unknown id
/// matches nothing and yields an empty result rather than an error.
/// A non-empty `search` keeps a post when any of title, excerpt,
/// content, or category label contains it case-insensitively. Sorting
/// is stable: equal keys keep their input order. The input is never
/// mutated.
pub fn query(posts: &[Post], category: &str, search: &str, sort_by: SortBy) -> Vec<Post> {
    let mut results: Vec<Post> = posts
        .iter()
        .filter(|p| category_matches(p, category))
        .filter(|p| search_matches(p, search))
        .cloned()
        .collect();

    match sort_by {
        SortBy::Recent => results.sort_by(|a, b| b.publish_date.cmp(&a.publish_date)),
        SortBy::Oldest => results.sort_by(|a, b| a.publish_date.cmp(&b.publish_date)),
        SortBy::ReadingTime => results.sort_by(|a, b| a.reading_time.cmp(&b.reading_time)),
    }

    results
}

fn category_matches(post: &Post, category: &str) -> bool {
    category == "all" || post.category.id() == category
}

fn search_matches(post: &Post, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || post.excerpt.to_lowercase().contains(&needle)
        || post.content.to_lowercase().contains(&needle)
        || post.category_label.to_lowercase().contains(&needle)
}

/// Rank candidates by relevance to a target post.
///
/// The target itself is excluded by slug. Relevance is the number of
/// shared extracted tags plus 2 for a matching category; ties (including
/// all-zero scores) keep candidate input order, so up to `limit` posts
/// always come back as long as any candidates exist.
pub fn related_posts(
    target: &Post,
    candidates: &[Post],
    vocabulary: &Vocabulary,
    limit: usize,
) -> Vec<Post> {
    let target_tags =
        vocabulary.extract_tags(&target.title, &target.content, DEFAULT_POST_TAG_LIMIT);

    let mut scored: Vec<(u32, &Post)> = candidates
        .iter()
        .filter(|p| p.slug != target.slug)
        .map(|p| {
            let tags = vocabulary.extract_tags(&p.title, &p.content, DEFAULT_POST_TAG_LIMIT);
            let shared = tags.iter().filter(|t| target_tags.contains(t)).count() as u32;
            let category_bonus = if p.category == target.category { 2 } else { 0 };
            (shared + category_bonus, p)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}

/// The trending ranking: featured posts first, then newest first.
///
/// Stable two-level comparator; a featured post outranks any
/// non-featured post regardless of date.
pub fn trending(posts: &[Post], limit: usize) -> Vec<Post> {
    let mut ranked = posts.to_vec();
    ranked.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.publish_date.cmp(&a.publish_date))
    });
    ranked.truncate(limit);
    ranked
}
