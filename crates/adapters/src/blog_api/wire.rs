//! Wire types for the blog API

use serde::Deserialize;
use trading_insights_domain::model::{Category, Post, estimate_reading_time, parse_publish_date};

#[derive(Deserialize)]
pub(crate) struct PostsResponse {
    pub posts: Vec<PostRecord>,
}

#[derive(Deserialize)]
pub(crate) struct PostResponse {
    pub post: PostRecord,
}

/// A post as the API serves it: camelCase fields, a string date, and
/// `readingTime`/`featured` optional
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub category_label: String,
    pub featured_image: String,
    pub author: String,
    pub publish_date: String,
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub featured: bool,
}

/// A record that could not be converted to a domain post
#[derive(Debug)]
pub(crate) struct MalformedRecord {
    pub id: String,
    pub message: String,
}

impl PostRecord {
    /// Convert to the domain record
    ///
    /// A missing `readingTime` is derived from the content word count;
    /// the only failure is a `publishDate` that does not parse.
    pub fn into_post(self) -> Result<Post, MalformedRecord> {
        let publish_date = parse_publish_date(&self.publish_date).map_err(|e| MalformedRecord {
            id: self.id.clone(),
            message: format!("publishDate '{}': {}", self.publish_date, e),
        })?;

        let reading_time = self
            .reading_time
            .unwrap_or_else(|| estimate_reading_time(&self.content));

        Ok(Post {
            id: self.id,
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            category_label: self.category_label,
            featured_image: self.featured_image,
            author: self.author,
            publish_date,
            reading_time,
            featured: self.featured,
        })
    }
}
