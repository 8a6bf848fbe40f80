//! Domain models and value objects

use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Content category for a post
///
/// The set is closed; every category pairs 1:1 with a display label.
/// The filter wildcard `all` is not a category and is handled by
/// [`CategoryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Forex,
    Psychology,
    Risk,
    Analysis,
    Education,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Forex,
        Category::Psychology,
        Category::Risk,
        Category::Analysis,
        Category::Education,
    ];

    /// Stable identifier used in filters and URLs
    pub fn id(&self) -> &'static str {
        match self {
            Category::Forex => "forex",
            Category::Psychology => "psychology",
            Category::Risk => "risk",
            Category::Analysis => "analysis",
            Category::Education => "education",
        }
    }

    /// Display label paired with the id
    pub fn label(&self) -> &'static str {
        match self {
            Category::Forex => "Forex Markets",
            Category::Psychology => "Trading Psychology",
            Category::Risk => "Risk Management",
            Category::Analysis => "Technical Analysis",
            Category::Education => "Education",
        }
    }

    /// Look up a category by id; `"all"` is not a category
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Category criterion for listing queries: a concrete category or the
/// `all` wildcard meaning "no filter"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.id(),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        Category::from_id(s)
            .map(CategoryFilter::Only)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Error for unrecognized category ids at an input boundary
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category '{0}', expected all, forex, psychology, risk, analysis, or education")]
pub struct ParseCategoryError(String);

/// A single published article
///
/// Posts are immutable value records for the lifetime of a query; the
/// core never creates, mutates, or destroys them. `id` and `slug` are
/// assumed unique within any collection handed to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub category_label: String,
    /// Image URI, opaque to the core
    pub featured_image: String,
    pub author: String,
    /// Calendar date only; used for ordering
    #[serde(with = "publish_date")]
    pub publish_date: Date,
    /// Minutes, at least 1
    pub reading_time: u32,
    #[serde(default)]
    pub featured: bool,
}

/// A post payload without a server-assigned id, for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub category_label: String,
    pub featured_image: String,
    pub author: String,
    #[serde(with = "publish_date")]
    pub publish_date: Date,
    pub reading_time: u32,
    #[serde(default)]
    pub featured: bool,
}

/// Serde helpers for the `YYYY-MM-DD` publish date wire format
pub mod publish_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_publish_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_publish_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a `YYYY-MM-DD` publish date string
pub fn parse_publish_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw, DATE_FORMAT)
}

/// Format a publish date as `YYYY-MM-DD`
pub fn format_publish_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .expect("calendar dates always format")
}

/// Estimated reading time in minutes at 200 words per minute, rounded up,
/// minimum 1
pub fn estimate_reading_time(content: &str) -> u32 {
    const WORDS_PER_MINUTE: u32 = 200;
    let words = content.split_whitespace().count() as u32;
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Derive a URL-safe slug from a title: lowercase, runs of
/// non-alphanumeric characters collapsed to `-`, no leading or trailing `-`
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}
