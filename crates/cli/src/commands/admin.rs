//! Admin commands - session gate and post CRUD

use anyhow::{Context, Result, anyhow, bail};
use secrecy::SecretString;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use trading_insights_adapters::blog_api::HttpPostEditor;
use trading_insights_adapters::session::{AdminCredentials, FileSessionGate};
use trading_insights_domain::model::{
    Category, PostDraft, estimate_reading_time, parse_publish_date, slug_from_title,
};
use trading_insights_domain::ports::{Clock, PostEditor, SessionGate, SystemClock};

use crate::args::{AdminArgs, AdminCommands};
use crate::config::AppConfig;

pub async fn execute(args: AdminArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    match args.command {
        AdminCommands::Login { email } => login(&config, &email),
        AdminCommands::Logout => logout(&config),
        AdminCommands::Create { file } => create(&config, &file).await,
        AdminCommands::Update { id, file } => update(&config, &id, &file).await,
        AdminCommands::Delete { id, yes } => delete(&config, &id, yes).await,
    }
}

fn login(config: &AppConfig, email: &str) -> Result<()> {
    let expected_email = load_env(&config.admin.email_env, "admin email")?;
    let expected_password = load_env(&config.admin.password_env, "admin password")?;
    let credentials = AdminCredentials::new(expected_email, SecretString::new(expected_password.into()));

    let gate = FileSessionGate::with_credentials(credentials, &config.admin.session_path);

    let password = read_password().context("Failed to read password from stdin")?;
    if gate.login(email, password.trim_end_matches(['\r', '\n']))? {
        println!("Logged in.");
        Ok(())
    } else {
        bail!("Invalid credentials");
    }
}

fn logout(config: &AppConfig) -> Result<()> {
    let gate = FileSessionGate::new(&config.admin.session_path);
    gate.logout()?;
    println!("Logged out.");
    Ok(())
}

async fn create(config: &AppConfig, file: &Path) -> Result<()> {
    require_session(config)?;

    let draft = load_draft(file, &SystemClock)?;
    let post = editor(config)
        .create_post(&draft)
        .await
        .context("Failed to create post")?;

    println!("Created '{}' (id {}, slug {})", post.title, post.id, post.slug);
    Ok(())
}

async fn update(config: &AppConfig, id: &str, file: &Path) -> Result<()> {
    require_session(config)?;

    let draft = load_draft(file, &SystemClock)?;
    let post = editor(config)
        .update_post(id, &draft)
        .await
        .with_context(|| format!("Failed to update post '{}'", id))?;

    println!("Updated '{}' (id {})", post.title, post.id);
    Ok(())
}

async fn delete(config: &AppConfig, id: &str, yes: bool) -> Result<()> {
    require_session(config)?;

    if !yes {
        bail!("Refusing to delete post '{}' without --yes", id);
    }

    editor(config)
        .delete_post(id)
        .await
        .with_context(|| format!("Failed to delete post '{}'", id))?;

    println!("Deleted post {}", id);
    Ok(())
}

fn editor(config: &AppConfig) -> HttpPostEditor {
    HttpPostEditor::with_timeout(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )
}

fn require_session(config: &AppConfig) -> Result<()> {
    let gate = FileSessionGate::new(&config.admin.session_path);
    if !gate.is_authenticated()? {
        bail!("Not logged in; run `trading-insights admin login` first");
    }
    Ok(())
}

fn load_env(env_var: &str, what: &str) -> Result<String> {
    if env_var.trim().is_empty() {
        bail!("No environment variable configured for the {}", what);
    }

    let value = std::env::var(env_var)
        .with_context(|| format!("Missing {} env var {}", what, env_var))?;

    if value.trim().is_empty() {
        bail!("{} env var {} is empty", what, env_var);
    }

    Ok(value)
}

fn read_password() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Authoring format for create/update: snake_case TOML with optional
/// fields derived when omitted
#[derive(Debug, Deserialize)]
struct DraftFile {
    title: String,
    excerpt: String,
    content: String,
    category: String,
    author: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    featured_image: Option<String>,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    reading_time: Option<u32>,
    #[serde(default)]
    featured: bool,
}

fn load_draft(path: &Path, clock: &dyn Clock) -> Result<PostDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft file: {}", path.display()))?;

    let draft: DraftFile = toml::from_str(&raw)
        .with_context(|| format!("Invalid draft file: {}", path.display()))?;

    let category = Category::from_id(&draft.category)
        .ok_or_else(|| anyhow!("unknown category '{}' in draft", draft.category))?;

    let publish_date = match &draft.publish_date {
        Some(raw_date) => parse_publish_date(raw_date)
            .with_context(|| format!("Invalid publish_date '{}' in draft", raw_date))?,
        None => clock.now().date(),
    };

    Ok(PostDraft {
        slug: draft
            .slug
            .unwrap_or_else(|| slug_from_title(&draft.title)),
        reading_time: draft
            .reading_time
            .unwrap_or_else(|| estimate_reading_time(&draft.content)),
        category_label: category.label().to_string(),
        title: draft.title,
        excerpt: draft.excerpt,
        content: draft.content,
        category,
        featured_image: draft.featured_image.unwrap_or_default(),
        author: draft.author,
        publish_date,
        featured: draft.featured,
    })
}
