//! Configuration schema types for Chatline.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod endpoint;
mod storage;
mod system;

pub use endpoint::*;
pub use storage::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Chatline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ChatlineConfig {
    pub endpoint: EndpointConfig,
    pub storage: StorageConfig,
    pub messages: MessagesConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_chat_api() {
        let config = ChatlineConfig::default();
        assert_eq!(config.endpoint.chat_url(), "http://localhost:3000/api/chat");
        assert_eq!(config.storage.key, "chatSessionId");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.endpoint.request_timeout_secs.is_none());
    }

    #[test]
    fn chat_url_strips_trailing_slash() {
        let endpoint = EndpointConfig {
            base_url: "https://chat.example.com/".into(),
            ..EndpointConfig::default()
        };
        assert_eq!(endpoint.chat_url(), "https://chat.example.com/api/chat");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ChatlineConfig = toml::from_str(
            r#"
[storage]
backend = "memory"

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.key, "chatSessionId");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.endpoint, EndpointConfig::default());
    }

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::Warn.as_directive(), "warn");
        assert_eq!(LogLevel::default().as_directive(), "info");
    }
}
