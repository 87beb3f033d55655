//! Chat endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where and how chat requests are sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Scheme and authority of the chat service, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Request path appended to `base_url`.
    pub chat_path: String,
    /// TCP connect timeout in seconds. Unset uses the HTTP client default.
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds. Unset uses the HTTP client default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            chat_path: "/api/chat".into(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.chat_path)
    }
}
