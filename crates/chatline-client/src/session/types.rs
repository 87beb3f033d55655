//! Session types and the in-flight guard.

use std::sync::atomic::Ordering;

use chatline_common::{SessionEvent, SessionId};
use tracing::warn;

use crate::{ChatError, Message};

use super::manager::ChatSession;

/// Result of a send attempt.
#[derive(Debug)]
pub enum SendOutcome {
    /// The server answered; history now equals the server's history.
    Delivered,
    /// The request failed; an error reply was appended to history.
    Failed(ChatError),
    /// The server invalidated the session; a new one was started with
    /// empty history.
    SessionReset,
    /// Another send was in flight, nothing happened.
    Suppressed,
    /// The text was blank, nothing happened.
    Ignored,
}

/// Point-in-time copy of the session state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: Option<SessionId>,
    pub history: Vec<Message>,
    pub input: String,
    pub loading: bool,
}

/// Holds the `loading` flag for one send.
///
/// On drop the flag is cleared and `LoadingChanged(false)` published, even
/// if the send future was cancelled. A send dropped before it settled is
/// treated as a failed request: the error reply is appended so the user
/// message never stands unanswered.
pub(super) struct SendGuard<'a> {
    session: &'a ChatSession,
    settled: bool,
}

impl<'a> SendGuard<'a> {
    /// Attempt to take the flag. Returns `None` if a send is already in flight.
    pub(super) fn acquire(session: &'a ChatSession) -> Option<Self> {
        session
            .loading
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;
        session.events.publish(SessionEvent::LoadingChanged(true));
        Some(Self {
            session,
            settled: false,
        })
    }

    /// Mark the reply (or failure) as merged into local state.
    pub(super) fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("send cancelled before the request completed");
            let len = {
                let mut state = self.session.lock_state();
                state
                    .history
                    .push(Message::model(self.session.error_reply.clone()));
                state.history.len()
            };
            self.session
                .events
                .publish(SessionEvent::HistoryChanged { len });
        }
        self.session.loading.store(false, Ordering::Release);
        self.session
            .events
            .publish(SessionEvent::LoadingChanged(false));
    }
}
