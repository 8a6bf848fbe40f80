//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use trading_insights_adapters::cache::SqlitePostCache;
use trading_insights_domain::ports::{PostCache, PostCatalog};

use crate::args::DoctorArgs;
use crate::commands::catalog;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    api: CheckResult,
    cache: CheckResult,
    admin: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        api: CheckResult::error("Not checked"),
        cache: CheckResult::error("Not checked"),
        admin: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.api = check_api(config).await;
        report.cache = check_cache(config).await;
        report.admin = check_admin(config);
    }

    // The cache and admin checks can only warn; config and API decide
    // between ok and error.
    let has_error = [&report.config, &report.api].iter().any(|c| c.is_error());
    let all_ok = [&report.config, &report.api, &report.cache, &report.admin]
        .iter()
        .all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }

    if has_error {
        anyhow::bail!("doctor found problems");
    }

    Ok(())
}

async fn check_api(config: &AppConfig) -> CheckResult {
    match catalog(config).fetch_posts().await {
        Ok(posts) => CheckResult::ok(format!("Blog API reachable at {}", config.api.base_url))
            .with_details(serde_json::json!({ "post_count": posts.len() })),
        Err(e) => CheckResult::error(format!("Blog API check failed: {}", e)),
    }
}

async fn check_cache(config: &AppConfig) -> CheckResult {
    let cache = match SqlitePostCache::new(&config.general.cache_db_path).await {
        Ok(cache) => cache,
        Err(e) => return CheckResult::warn(format!("Failed to open the local cache: {}", e)),
    };

    match cache.last_sync().await {
        Ok(Some(record)) => {
            let synced_at = record
                .synced_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string());
            CheckResult::ok(format!(
                "Cache last synced {} ({} posts)",
                synced_at, record.post_count
            ))
        }
        Ok(None) => CheckResult::warn("Cache is empty; run `trading-insights sync`"),
        Err(e) => CheckResult::warn(format!("Failed to read the local cache: {}", e)),
    }
}

fn check_admin(config: &AppConfig) -> CheckResult {
    let email_set = env_is_set(&config.admin.email_env);
    let password_set = env_is_set(&config.admin.password_env);

    if email_set && password_set {
        CheckResult::ok("Admin credentials configured")
    } else {
        CheckResult::warn(format!(
            "Admin credentials not fully configured (set {} and {})",
            config.admin.email_env, config.admin.password_env
        ))
    }
}

fn env_is_set(env_var: &str) -> bool {
    !env_var.trim().is_empty()
        && std::env::var(env_var)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
}

fn print_human(report: &DoctorReport) {
    println!("config: {} - {}", report.config.status, report.config.message);
    println!("api:    {} - {}", report.api.status, report.api.message);
    println!("cache:  {} - {}", report.cache.status, report.cache.message);
    println!("admin:  {} - {}", report.admin.status, report.admin.message);
    println!();
    println!("overall: {}", report.overall);
}
