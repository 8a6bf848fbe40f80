//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trading_insights_domain::model::CategoryFilter;
use trading_insights_domain::usecases::SortBy;

/// trading-insights: CLI for browsing and managing the trading-insights blog
#[derive(Parser, Debug)]
#[command(name = "trading-insights")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts with category filter, search, and sorting
    Posts(PostsArgs),

    /// Show a single post with rendered body, tags, and related articles
    Show(ShowArgs),

    /// Site-wide tag cloud over the post collection
    Tags(TagsArgs),

    /// Trending posts: featured first, then newest
    Trending(TrendingArgs),

    /// Refresh the local post cache from the blog API
    Sync,

    /// Admin session and post management
    Admin(AdminArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct PostsArgs {
    /// Category id, or `all` for every category
    #[arg(long, default_value = "all")]
    pub category: CategoryFilter,

    /// Case-insensitive search across title, excerpt, content, and
    /// category label
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort order: recent, oldest, or reading-time
    #[arg(long, default_value = "recent")]
    pub sort: SortBy,

    /// Serve from the local cache instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Slug of the post to show
    pub slug: String,

    /// Serve from the local cache instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Maximum number of tags (defaults to the configured cloud limit)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Serve from the local cache instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TrendingArgs {
    /// Maximum number of posts (defaults to the configured trending limit)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Serve from the local cache instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Open an admin session; the password is read from stdin
    Login {
        /// Admin email address
        #[arg(long)]
        email: String,
    },

    /// Close the admin session
    Logout,

    /// Create a post from a TOML draft file
    Create {
        /// Path to the draft file
        #[arg(long)]
        file: PathBuf,
    },

    /// Replace a post from a TOML draft file
    Update {
        /// Id of the post to replace
        id: String,

        /// Path to the draft file
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a post
    Delete {
        /// Id of the post to delete
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
