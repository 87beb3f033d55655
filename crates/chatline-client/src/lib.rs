//! Chat client for Chatline.
//!
//! Provides the session controller that talks to a remote chat endpoint:
//! - Session identifier creation, persistence, and rotation
//! - Optimistic user messages with server-authoritative history
//! - Pluggable transport (`reqwest` over HTTP by default)
//! - Pluggable key-value storage for the session identifier
//! - Snapshot + event subscription for views

pub mod message;
pub mod session;
pub mod store;
pub mod transport;

pub use message::{ChatReply, ChatRequest, Message, Part, Role};
pub use session::{ChatSession, SendOutcome, SessionSnapshot};
pub use store::{FileStore, MemoryStore, SessionStore};
pub use transport::{ChatTransport, HttpTransport, HttpTransportConfig};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Session invalidated by server")]
    SessionInvalidated,
}

impl ChatError {
    /// Whether the server ended the session and the client must start a new one.
    pub fn is_session_invalidated(&self) -> bool {
        matches!(self, ChatError::SessionInvalidated)
    }
}
