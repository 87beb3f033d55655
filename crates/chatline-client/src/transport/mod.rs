//! Transport to the remote chat endpoint.

mod config;
mod http;

use async_trait::async_trait;

use crate::{ChatError, ChatReply, ChatRequest};

pub use config::HttpTransportConfig;
pub use http::{signals_invalidation, HttpTransport};

/// Delivers one chat request and returns the server's reply.
///
/// Implementations classify failures: a response that signals the session
/// was invalidated must map to [`ChatError::SessionInvalidated`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}
