//! Integration test for the default CLI program
//!
//! Drives the assembled program through `cli::execute` with a synthetic
//! configuration; git operations use unreachable file:// URLs so every
//! repository lands in the `failed` bucket without touching the network.

use crk::cli::{execute, CliError};
use crk::config::Configuration;
use crk::engine::EngineError;
use serde_json::json;
use tempfile::tempdir;

fn config_with(repositories: &[&str], clone_dir: &str) -> Configuration {
    let mut config = Configuration::default();
    config.repositories = repositories.iter().map(|s| s.to_string()).collect();
    config.clone.dir = clone_dir.to_string();
    config
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn version_and_help_routes_run_clean() {
    let config = config_with(&[], ".");
    let bus = execute(&config, &tokens(&["--version", "--help"])).await.unwrap();
    // Neither route produces a bus value; they only print.
    assert!(bus.is_empty());
}

#[tokio::test]
async fn repos_selection_feeds_the_clone_report() {
    let dir = tempdir().unwrap();
    let config = config_with(
        &[
            "file:///nonexistent/module-esd.git@main",
            "file:///nonexistent/module-sidebar.git@main",
        ],
        dir.path().to_str().unwrap(),
    );

    let bus = execute(&config, &tokens(&["repos:[esd]", "--clone"])).await.unwrap();

    assert_eq!(bus.get("repos"), Some(&json!(["file:///nonexistent/module-esd.git"])));
    let report = bus.get("--clone").unwrap();
    assert_eq!(report["succeeded"], json!([]));
    assert_eq!(report["failed"], json!(["file:///nonexistent/module-esd.git"]));
}

#[tokio::test]
async fn clone_without_selection_operates_on_all_repositories() {
    let dir = tempdir().unwrap();
    let config = config_with(
        &[
            "file:///nonexistent/a.git",
            "file:///nonexistent/b.git",
        ],
        dir.path().to_str().unwrap(),
    );

    let bus = execute(&config, &tokens(&["--clone"])).await.unwrap();
    let failed = bus.get("--clone").unwrap()["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 2);
}

#[tokio::test]
async fn empty_selection_clones_nothing() {
    let dir = tempdir().unwrap();
    let config = config_with(&["file:///nonexistent/a.git"], dir.path().to_str().unwrap());

    // repos:[zzz] matches no configured path, so --clone gets an empty list.
    let bus = execute(&config, &tokens(&["repos:[zzz]", "--clone"])).await.unwrap();
    assert_eq!(bus.get("repos"), Some(&json!([])));
    let report = bus.get("--clone").unwrap();
    assert_eq!(report["succeeded"], json!([]));
    assert_eq!(report["failed"], json!([]));
}

#[tokio::test]
async fn empty_invocation_exits_with_usage_code() {
    let config = config_with(&[], ".");
    let err = execute(&config, &[]).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::EngineError(EngineError::EmptyInvocation)
    ));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn malformed_token_exits_with_usage_code() {
    let config = config_with(&[], ".");
    let err = execute(&config, &tokens(&["--clone", "stray"])).await.unwrap_err();
    assert!(matches!(err, CliError::ParseError(_)));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn unknown_pattern_matches_no_route_and_succeeds() {
    let config = config_with(&[], ".");
    let bus = execute(&config, &tokens(&["--nonsense"])).await.unwrap();
    assert!(bus.is_empty());
}
