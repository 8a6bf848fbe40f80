//! trading-insights domain crate
//!
//! This crate contains the core content logic following hexagonal
//! architecture:
//! - `model`: post records, categories, reading-time and slug helpers
//! - `vocabulary`: the controlled tag vocabulary and extraction
//! - `ports`: trait definitions for external collaborators (adapters)
//! - `usecases`: body rendering and the listing/related/trending queries

pub mod model;
pub mod ports;
pub mod usecases;
pub mod vocabulary;

pub use model::*;
pub use ports::*;
pub use vocabulary::{TagCount, Vocabulary};

use sha2::{Digest, Sha256};

/// Compute a deterministic digest of a post's visible content
/// Used by the sync layer to detect changed posts between syncs
pub fn content_digest(post: &model::Post) -> String {
    let mut hasher = Sha256::new();
    hasher.update(post.title.as_bytes());
    hasher.update(post.excerpt.as_bytes());
    hasher.update(post.content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Post};
    use time::macros::date;

    fn sample_post() -> Post {
        Post {
            id: "1".to_string(),
            slug: "sample".to_string(),
            title: "Sample".to_string(),
            excerpt: "An excerpt".to_string(),
            content: "Body text".to_string(),
            category: Category::Education,
            category_label: Category::Education.label().to_string(),
            featured_image: String::new(),
            author: "Research Desk".to_string(),
            publish_date: date!(2024 - 01 - 01),
            reading_time: 1,
            featured: false,
        }
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let post = sample_post();
        assert_eq!(content_digest(&post), content_digest(&post));

        let mut edited = post.clone();
        edited.content = "Edited body".to_string();
        assert_ne!(content_digest(&post), content_digest(&edited));

        // Metadata-only changes do not affect the digest.
        let mut renamed = post.clone();
        renamed.author = "Someone Else".to_string();
        assert_eq!(content_digest(&post), content_digest(&renamed));
    }
}
