//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trading_insights_domain::usecases::query::{DEFAULT_RELATED_LIMIT, DEFAULT_TRENDING_LIMIT};
use trading_insights_domain::vocabulary::{
    DEFAULT_CLOUD_LIMIT, DEFAULT_POST_TAG_LIMIT, DEFAULT_TERMS,
};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_cache_db_path")]
    pub cache_db_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Environment variable holding the expected admin email
    #[serde(default = "default_email_env")]
    pub email_env: String,

    /// Environment variable holding the expected admin password
    #[serde(default = "default_password_env")]
    pub password_env: String,

    /// Where the session marker file lives
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// The controlled tag vocabulary, in ranking order
    #[serde(default = "default_vocabulary")]
    pub vocabulary: Vec<String>,

    #[serde(default = "default_post_tag_limit")]
    pub post_tag_limit: usize,

    #[serde(default = "default_cloud_limit")]
    pub cloud_limit: usize,

    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
}

// Default value functions
fn default_cache_db_path() -> PathBuf {
    PathBuf::from("./cache.sqlite")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_email_env() -> String {
    "BLOG_ADMIN_EMAIL".to_string()
}

fn default_password_env() -> String {
    "BLOG_ADMIN_PASSWORD".to_string()
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./.admin-session")
}

fn default_vocabulary() -> Vec<String> {
    DEFAULT_TERMS.iter().map(|t| (*t).to_string()).collect()
}

fn default_post_tag_limit() -> usize {
    DEFAULT_POST_TAG_LIMIT
}

fn default_cloud_limit() -> usize {
    DEFAULT_CLOUD_LIMIT
}

fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

fn default_trending_limit() -> usize {
    DEFAULT_TRENDING_LIMIT
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_db_path: default_cache_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email_env: default_email_env(),
            password_env: default_password_env(),
            session_path: default_session_path(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
            post_tag_limit: default_post_tag_limit(),
            cloud_limit: default_cloud_limit(),
            related_limit: default_related_limit(),
            trending_limit: default_trending_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("TRADING_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# trading-insights configuration

[general]
cache_db_path = "./cache.sqlite"
log_level = "info"

[api]
base_url = "http://localhost:3000/api"
timeout_secs = 30

[admin]
# Environment variables holding the expected credential pair; the
# credentials themselves never live in this file.
email_env = "BLOG_ADMIN_EMAIL"
password_env = "BLOG_ADMIN_PASSWORD"
session_path = "./.admin-session"

[content]
# The controlled tag vocabulary, in ranking order. Defaults to the
# standard list of currency pairs and trading concepts; uncomment to
# override.
# vocabulary = ["EUR/USD", "GBP/USD", "Forex", "Risk Management"]
post_tag_limit = 6
cloud_limit = 12
related_limit = 3
trending_limit = 5
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_standard_vocabulary() {
        let config = AppConfig::default();
        assert_eq!(config.content.vocabulary.len(), DEFAULT_TERMS.len());
        assert_eq!(config.content.vocabulary[0], "EUR/USD");
        assert_eq!(config.content.post_tag_limit, 6);
        assert_eq!(config.content.cloud_limit, 12);
    }

    #[test]
    fn example_toml_parses_back() {
        let parsed: AppConfig = toml::from_str(&AppConfig::example_toml()).unwrap();
        assert_eq!(parsed.api.timeout_secs, 30);
        assert_eq!(parsed.admin.email_env, "BLOG_ADMIN_EMAIL");
        // The commented-out vocabulary falls back to the default list.
        assert_eq!(parsed.content.vocabulary.len(), DEFAULT_TERMS.len());
    }
}
