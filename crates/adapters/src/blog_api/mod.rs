//! Blog REST API adapters
//!
//! The public endpoints serve the post collection and single posts; the
//! admin endpoints create, replace, and delete posts.

mod read;
mod wire;
mod write;

pub use read::HttpPostCatalog;
pub use write::HttpPostEditor;
