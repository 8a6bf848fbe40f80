use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_json(id: &str, slug: &str, title: &str, publish_date: &str, featured: bool) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "excerpt": "price action",
        "content": "## Outlook\n\nThe **breakout** continues toward resistance.\n\n- watch EUR/USD\n- mind your stop loss",
        "category": "analysis",
        "categoryLabel": "Technical Analysis",
        "featuredImage": "https://example.com/image.jpg",
        "author": "Research Desk",
        "publishDate": publish_date,
        "readingTime": 4,
        "featured": featured
    })
}

async fn mock_collection(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [
                post_json("1", "gold-breakout", "Gold Breakout", "2024-03-01", false),
                post_json("2", "fib-levels", "Fibonacci Levels", "2024-05-01", true),
            ]
        })))
        .mount(server)
        .await;
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("base_url"));
    assert!(content.contains("cache_db_path"));
    assert!(content.contains("email_env"));
}

#[test]
fn unknown_category_is_rejected_at_the_boundary() {
    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.args(["posts", "--category", "crypto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn unknown_sort_order_is_rejected_at_the_boundary() {
    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.args(["posts", "--sort", "alphabetical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sort order"));
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_lists_the_collection_as_json() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    let mut cmd = cargo_bin_cmd!("trading-insights");
    let output = cmd
        .env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .args(["posts", "--json"])
        .output()
        .expect("run posts");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let posts = value.as_array().expect("array");
    assert_eq!(posts.len(), 2);
    // Default sort is newest first.
    assert_eq!(posts[0]["slug"], "fib-levels");
    assert_eq!(posts[1]["slug"], "gold-breakout");
}

#[tokio::test(flavor = "multi_thread")]
async fn search_narrows_the_listing() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    let mut cmd = cargo_bin_cmd!("trading-insights");
    let output = cmd
        .env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .args(["posts", "--search", "fibonacci", "--json"])
        .output()
        .expect("run posts");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let posts = value.as_array().expect("array");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "fib-levels");
}

#[tokio::test(flavor = "multi_thread")]
async fn show_renders_the_body_and_related_articles() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    Mock::given(method("GET"))
        .and(path("/posts/gold-breakout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post": post_json("1", "gold-breakout", "Gold Breakout", "2024-03-01", false)
        })))
        .mount(&server)
        .await;

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .args(["show", "gold-breakout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2>Outlook</h2>"))
        .stdout(predicate::str::contains("<strong>breakout</strong>"))
        .stdout(predicate::str::contains("<ul><li>watch EUR/USD</li>"))
        .stdout(predicate::str::contains("tags: EUR/USD"))
        .stdout(predicate::str::contains("Related articles:"))
        .stdout(predicate::str::contains("fib-levels"));
}

#[tokio::test(flavor = "multi_thread")]
async fn show_missing_post_fails_with_not_found() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    Mock::given(method("GET"))
        .and(path("/posts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .args(["show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn tags_and_trending_rank_the_collection() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    let mut cmd = cargo_bin_cmd!("trading-insights");
    let output = cmd
        .env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .args(["tags", "--json"])
        .output()
        .expect("run tags");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let tags = value.as_array().expect("array");
    // Both posts mention EUR/USD in their shared content body.
    assert!(tags.iter().any(|t| t["tag"] == "EUR/USD" && t["count"] == 2));

    let mut cmd = cargo_bin_cmd!("trading-insights");
    let output = cmd
        .env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .args(["trending", "--json"])
        .output()
        .expect("run trending");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let ranked = value.as_array().expect("array");
    // The featured post outranks the newer unfeatured one... both are
    // ranked featured-first here since fib-levels is featured AND newest;
    // it must come first either way.
    assert_eq!(ranked[0]["slug"], "fib-levels");
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_then_offline_listing_works_without_the_api() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("cache.sqlite");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .env("TRADING_INSIGHTS__GENERAL__CACHE_DB_PATH", &db_path)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 2 post(s)"))
        .stdout(predicate::str::contains("2 changed"));

    // No API base URL override here: offline mode must not need it.
    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__GENERAL__CACHE_DB_PATH", &db_path)
        .args(["posts", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold Breakout"))
        .stdout(predicate::str::contains("Fibonacci Levels"));
}

#[test]
fn offline_listing_with_empty_cache_points_at_sync() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("cache.sqlite");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__GENERAL__CACHE_DB_PATH", &db_path)
        .args(["posts", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync"));
}

#[test]
fn admin_commands_require_a_session() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env(
        "TRADING_INSIGHTS__ADMIN__SESSION_PATH",
        dir.path().join("session"),
    )
    .args(["admin", "delete", "42", "--yes"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn admin_login_validates_the_credential_pair() {
    let dir = TempDir::new().expect("temp dir");
    let session = dir.path().join("session");

    // Wrong password.
    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("BLOG_ADMIN_EMAIL", "admin@example.com")
        .env("BLOG_ADMIN_PASSWORD", "right-password")
        .env("TRADING_INSIGHTS__ADMIN__SESSION_PATH", &session)
        .args(["admin", "login", "--email", "admin@example.com"])
        .write_stdin("wrong-password\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
    assert!(!session.exists());

    // Matching pair.
    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("BLOG_ADMIN_EMAIL", "admin@example.com")
        .env("BLOG_ADMIN_PASSWORD", "right-password")
        .env("TRADING_INSIGHTS__ADMIN__SESSION_PATH", &session)
        .args(["admin", "login", "--email", "admin@example.com"])
        .write_stdin("right-password\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in."));
    assert!(session.is_file());

    // Logout drops the marker.
    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__ADMIN__SESSION_PATH", &session)
        .args(["admin", "logout"])
        .assert()
        .success();
    assert!(!session.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_create_posts_a_draft_after_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(
            "42",
            "gold-breakout-ahead",
            "Gold Breakout Ahead",
            "2024-06-01",
            false,
        )))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let session = dir.path().join("session");

    let draft_path = dir.path().join("draft.toml");
    fs::write(
        &draft_path,
        r#"
title = "Gold Breakout Ahead"
excerpt = "price action"
content = """
## Outlook

The **breakout** continues.
"""
category = "analysis"
author = "Research Desk"
"#,
    )
    .expect("write draft");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("BLOG_ADMIN_EMAIL", "admin@example.com")
        .env("BLOG_ADMIN_PASSWORD", "right-password")
        .env("TRADING_INSIGHTS__ADMIN__SESSION_PATH", &session)
        .args(["admin", "login", "--email", "admin@example.com"])
        .write_stdin("right-password\n")
        .assert()
        .success();

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .env("TRADING_INSIGHTS__ADMIN__SESSION_PATH", &session)
        .args(["admin", "create", "--file"])
        .arg(&draft_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stdout(predicate::str::contains("gold-breakout-ahead"));
}

#[test]
fn admin_delete_refuses_without_confirmation() {
    let dir = TempDir::new().expect("temp dir");
    let session = dir.path().join("session");
    // Fake an open session; the refusal must come before any network use.
    fs::write(&session, "authenticated 2024-06-01T00:00:00Z\n").expect("write session");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    cmd.env("TRADING_INSIGHTS__ADMIN__SESSION_PATH", &session)
        .args(["admin", "delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn doctor_reports_api_health_as_json() {
    let server = MockServer::start().await;
    mock_collection(&server).await;

    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trading-insights");
    let output = cmd
        .env("TRADING_INSIGHTS__API__BASE_URL", server.uri())
        .env(
            "TRADING_INSIGHTS__GENERAL__CACHE_DB_PATH",
            dir.path().join("cache.sqlite"),
        )
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["config"]["status"], "ok");
    assert_eq!(value["api"]["status"], "ok");
    assert_eq!(value["api"]["details"]["post_count"], 2);
    // Nothing synced yet, so the cache check warns and overall is warn.
    assert_eq!(value["cache"]["status"], "warn");
    assert_ne!(value["overall"], "error");
}
