//! Use cases for content rendering and discovery

pub mod query;
pub mod render;

pub use query::{SortBy, query, related_posts, trending};
pub use render::render_html;
