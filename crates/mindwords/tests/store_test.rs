//! Tests for local preference storage.

use mindwords::{FileStore, Level, LocalStore, MemoryStore, Session};
use mindwords_round::RoundRules;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("prefs.toml"));

    assert_eq!(store.load_name().expect("Load name"), None);
    assert_eq!(store.load_level().expect("Load level"), Level::FIRST);
}

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");

    let mut store = FileStore::new(&path);
    store.save_name("Ada").expect("Save name");
    store.save_level(Level::new(4)).expect("Save level");

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.load_name().expect("Load name").as_deref(), Some("Ada"));
    assert_eq!(reopened.load_level().expect("Load level").get(), 4);
}

#[test]
fn test_saving_level_keeps_name() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::new(dir.path().join("prefs.toml"));
    store.save_name("Ada").expect("Save name");
    store.save_level(Level::new(2)).expect("Save level");

    assert_eq!(store.load_name().expect("Load name").as_deref(), Some("Ada"));
}

#[test]
fn test_creates_parent_directories() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("deeper").join("prefs.toml");

    let mut store = FileStore::new(&path);
    store.save_level(Level::new(3)).expect("Save level");
    assert!(path.exists());
}

#[test]
fn test_stored_level_below_one_is_clamped() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "level = -5\n").expect("Write prefs");

    let store = FileStore::new(&path);
    assert_eq!(store.load_level().expect("Load level"), Level::FIRST);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "level = [not toml").expect("Write prefs");

    let store = FileStore::new(&path);
    let err = store.load_level().expect_err("Corrupt file should fail");
    assert!(err.message.contains("parse"));
}

#[test]
fn test_save_overwrites_corrupt_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "level = \"two\"\n").expect("Write prefs");

    let mut store = FileStore::new(&path);
    store.save_level(Level::new(5)).expect("Save over corrupt file");
    assert_eq!(store.load_level().expect("Load level").get(), 5);

    store.save_name("Ada").expect("Save name");
    assert_eq!(store.load_name().expect("Load name").as_deref(), Some("Ada"));
    assert_eq!(store.load_level().expect("Load level").get(), 5);
}

#[test]
fn test_session_recovers_from_corrupt_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "level = \"two\"\n").expect("Write prefs");

    let mut session = Session::new(FileStore::new(&path), RoundRules::default());
    assert_eq!(session.level(), Level::FIRST);
    let request = session.request_word();
    session.receive_word(request.generation, Ok("hello".to_string()));
    session.guess("hello").expect("Valid guess");

    assert_eq!(session.level().get(), 2);
    let stored = FileStore::new(&path).load_level().expect("Load level");
    assert_eq!(stored.get(), 2);
}

#[test]
fn test_save_reports_read_failure() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    // A directory exists at the path but cannot be read as a file.
    let mut store = FileStore::new(dir.path());
    let err = store
        .save_level(Level::new(2))
        .expect_err("Unreadable file should fail");
    assert!(err.message.contains("read"));
}

#[test]
fn test_memory_store() {
    let mut store = MemoryStore::with_level(Level::new(3));
    assert_eq!(store.load_level().expect("Load level").get(), 3);
    assert_eq!(store.load_name().expect("Load name"), None);

    store.save_name("Grace").expect("Save name");
    assert_eq!(store.load_name().expect("Load name").as_deref(), Some("Grace"));
}
