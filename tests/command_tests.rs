// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests of the filter command against the fake API.

use axum::http::Method;
use clap::Parser;
use serde_json::json;
use trakt_role_filter::cli::Args;
use trakt_role_filter::commands;
use trakt_role_filter::error::AppError;
use trakt_role_filter::models::{AppCredentials, TokenRecord};
use trakt_role_filter::services::CredentialStore;

mod common;
use common::{fresh_tokens, movie_credits, show_credits, test_context, FakeTrakt};

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["trakt-role-filter"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

async fn fake_with_credits() -> FakeTrakt {
    let fake = FakeTrakt::start().await;
    fake.respond(Method::GET, "/people/1/movies", 200, movie_credits());
    fake.respond(Method::GET, "/people/1/shows", 200, show_credits());
    fake
}

#[tokio::test]
async fn test_print_all_credits_by_trakt_id() {
    let fake = fake_with_credits().await;
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(dir.path(), &fake, fresh_tokens("t"));

    let mut out = Vec::new();
    commands::run(&mut ctx, &args(&["--trakt-id", "1"]), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "First Feature (2001) – cast: Lead (movie)",
            "Second Feature (2004) – Director (directing) (movie)",
            "Long Show (2010) – Writer (writing) (show)",
        ]
    );
}

#[tokio::test]
async fn test_role_and_media_filters_narrow_output() {
    let fake = fake_with_credits().await;
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(dir.path(), &fake, fresh_tokens("t"));

    let mut out = Vec::new();
    commands::run(
        &mut ctx,
        &args(&["-i", "1", "-f", "WRITER", "--tv-only"]),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Long Show (2010) – Writer (writing) (show)\n"
    );
}

#[tokio::test]
async fn test_no_matches_prints_nothing() {
    let fake = fake_with_credits().await;
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(dir.path(), &fake, fresh_tokens("t"));

    let mut out = Vec::new();
    commands::run(&mut ctx, &args(&["-i", "1", "-f", "composer"]), &mut out)
        .await
        .unwrap();

    assert!(out.is_empty());
}

#[tokio::test]
async fn test_list_name_publishes_instead_of_printing() {
    let fake = fake_with_credits().await;
    fake.respond(Method::GET, "/users/me/lists", 200, json!([]));
    fake.respond(
        Method::POST,
        "/users/me/lists",
        201,
        json!({"name": "Directed", "ids": {"trakt": 42}}),
    );
    fake.respond(Method::POST, "/users/me/lists/42/like", 204, json!(null));
    fake.respond(
        Method::POST,
        "/users/me/lists/42/items",
        201,
        json!({
            "added": {"movies": 1, "shows": 0},
            "existing": {"movies": 0, "shows": 0},
            "not_found": {"movies": [], "shows": []}
        }),
    );
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(dir.path(), &fake, fresh_tokens("t"));

    let mut out = Vec::new();
    commands::run(
        &mut ctx,
        &args(&["-i", "1", "-f", "director", "-l", "Directed"]),
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Added 1 item(s) to list \"Directed\""), "{text}");
    assert!(!text.contains("Second Feature"));

    let uploads = fake.requests_to(Method::POST, "/users/me/lists/42/items");
    assert_eq!(uploads.len(), 1);
    let body = uploads[0].json();
    assert_eq!(body["movies"], json!([{"ids": {"trakt": 102}}]));
    assert!(body.get("shows").is_none());
}

#[tokio::test]
async fn test_missing_app_credentials_is_config_error() {
    let fake = FakeTrakt::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = trakt_role_filter::config::Config::test_default(dir.path(), &fake.url);
    let store = CredentialStore::in_memory(
        &config.token_path,
        AppCredentials::default(),
        TokenRecord::default(),
    );
    let mut ctx = trakt_role_filter::AppContext::with_store(config, store);

    let mut out = Vec::new();
    let err = commands::run(&mut ctx, &args(&["-i", "1"]), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Config(_)), "unexpected error: {err}");
    assert!(err.hint().is_some());
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_unauthorized_catalog_call_suggests_reauthorizing() {
    let fake = FakeTrakt::start().await;
    fake.respond(Method::GET, "/people/1/movies", 401, json!({"error": "invalid_token"}));
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(dir.path(), &fake, fresh_tokens("revoked"));

    let mut out = Vec::new();
    let err = commands::run(&mut ctx, &args(&["-i", "1"]), &mut out)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.hint().unwrap().contains("token file"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_name_search_without_hits_selects_nobody() {
    let fake = FakeTrakt::start().await;
    fake.respond(Method::GET, "/search/person", 200, json!([]));
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(dir.path(), &fake, fresh_tokens("t"));

    let mut out = Vec::new();
    let err = commands::run(&mut ctx, &args(&["-n", "Nobody At All"]), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoSelection), "unexpected error: {err}");
    assert!(out.is_empty());
    assert_eq!(fake.requests().len(), 1, "Only the search request is made");
    assert_eq!(fake.requests()[0].query, "query=Nobody+At+All");
}

#[tokio::test]
async fn test_cached_token_run_ignores_unusable_redirect_uri() {
    let fake = fake_with_credits().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = trakt_role_filter::config::Config::test_default(dir.path(), &fake.url);
    config.redirect_uri = "http://localhost:notaport".to_string();
    let store = CredentialStore::in_memory(
        &config.token_path,
        common::test_credentials(),
        fresh_tokens("t"),
    );
    let mut ctx = trakt_role_filter::AppContext::with_store(config, store);

    let mut out = Vec::new();
    commands::run(&mut ctx, &args(&["-i", "1", "-f", "cast"]), &mut out)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "First Feature (2001) – cast: Lead (movie)\n"
    );
}
