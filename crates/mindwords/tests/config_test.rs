//! Tests for configuration loading.

use std::time::Duration;

use mindwords::AppConfig;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(*config.word_attempts(), 6);
    assert_eq!(*config.max_tries(), 10);
    assert_eq!(*config.leaderboard_limit(), 30);
    assert_eq!(config.connect_timeout(), Duration::from_secs(15));
    assert_eq!(config.request_timeout(), Duration::from_secs(20));
    assert!(config.dreamlo_private_code().is_none());
    assert_eq!(config.round_rules().max_tries, 10);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("mindwords.toml");
    std::fs::write(
        &path,
        "word_attempts = 3\nmax_tries = 8\nword_api_url = \"http://127.0.0.1:9\"\n",
    )
    .expect("Write config");

    let config = AppConfig::from_file(&path).expect("Valid config");
    assert_eq!(*config.word_attempts(), 3);
    assert_eq!(config.round_rules().max_tries, 8);
    assert_eq!(config.word_api_url(), "http://127.0.0.1:9");
    assert_eq!(config.datamuse_url(), AppConfig::default().datamuse_url());
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("mindwords.toml");
    std::fs::write(&path, "word_attempts = \"many\"").expect("Write config");

    let err = AppConfig::from_file(&path).expect_err("Wrong type should fail");
    assert!(err.message.contains("parse"));
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::load(&dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(*config.word_attempts(), 6);
    assert_eq!(*config.leaderboard_limit(), 30);
}

#[test]
fn test_setters() {
    let config = AppConfig::default()
        .with_word_attempts(2u32)
        .with_ninjas_key("secret".to_string())
        .with_request_timeout_secs(5u64);

    assert_eq!(*config.word_attempts(), 2);
    assert_eq!(config.ninjas_key().as_deref(), Some("secret"));
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
}
