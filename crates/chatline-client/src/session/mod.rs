//! Chat session controller.
//!
//! A `ChatSession` owns the session identifier, the conversation history,
//! the pending input, and the loading flag. Views read state through
//! [`ChatSession::snapshot`] and redraw when a [`SessionEvent`] arrives on
//! the channel returned by [`ChatSession::subscribe`].
//!
//! [`SessionEvent`]: chatline_common::SessionEvent

mod chat;
mod manager;
mod types;


pub use manager::ChatSession;
pub use types::{SendOutcome, SessionSnapshot};
