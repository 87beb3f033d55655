//! Session identifier storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the session identifier is persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file in the platform data directory.
    #[default]
    File,
    /// Process memory only; a new session starts on every launch.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Override for the storage file. Defaults to `<data_dir>/chatline/session.json`.
    pub path: Option<PathBuf>,
    /// Key the session identifier is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: None,
            key: "chatSessionId".into(),
        }
    }
}
