//! trading-insights adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain
//! ports:
//! - `blog_api`: reqwest client for the blog REST API (read and admin write)
//! - `cache`: SQLite and in-memory post caches
//! - `session`: file-backed and in-memory admin session gates

mod cache_memory;
mod cache_sqlite;

pub mod blog_api;
pub mod session;

/// Re-exports for cache adapters
pub mod cache {
    pub use crate::cache_memory::InMemoryPostCache;
    pub use crate::cache_sqlite::SqlitePostCache;
}
