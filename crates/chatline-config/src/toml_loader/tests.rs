//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{ChatlineConfig, StorageBackend};
use chatline_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_chatline_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[endpoint]
base_url = "https://chat.example.com"
request_timeout_secs = 30

[storage]
key = "mySession"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.endpoint.base_url, "https://chat.example.com");
    assert_eq!(config.endpoint.request_timeout_secs, Some(30));
    assert_eq!(config.storage.key, "mySession");
    // Defaults preserved
    assert_eq!(config.endpoint.chat_path, "/api/chat");
    assert_eq!(config.storage.backend, StorageBackend::File);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_unknown_backend_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[storage]\nbackend = \"cloud\"\n").unwrap();

    assert!(matches!(load_from_path(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chatline").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config, ChatlineConfig::default());
}

#[test]
fn default_paths_live_under_app_dir() {
    let config = default_config_path().unwrap();
    assert_eq!(config.file_name().unwrap().to_str().unwrap(), "config.toml");
    assert!(config.parent().unwrap().ends_with("chatline"));

    let storage = default_storage_path().unwrap();
    assert_eq!(storage.file_name().unwrap().to_str().unwrap(), "session.json");
    assert!(storage.parent().unwrap().ends_with("chatline"));
}
