//! Async send path for ChatSession: optimistic append, request, merge.

use chatline_common::{new_correlation_id, SessionEvent, SessionId};
use tracing::{debug, info, warn};

use crate::{ChatError, ChatReply, ChatRequest, Message};

use super::manager::ChatSession;
use super::types::{SendGuard, SendOutcome};

impl ChatSession {
    /// Send the pending input.
    pub async fn submit(&self) -> SendOutcome {
        let text = self.input();
        self.send_message(text).await
    }

    /// Send one user message and merge the server's reply into local state.
    ///
    /// Blank text is ignored and a call made while another send is in flight
    /// is suppressed; neither touches history or the network. Otherwise the
    /// user message is appended immediately, the pending input is cleared,
    /// and the loading flag stays set until the request completes or the
    /// returned future is dropped.
    pub async fn send_message(&self, text: impl Into<String>) -> SendOutcome {
        let text = text.into();
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let Some(mut guard) = SendGuard::acquire(self) else {
            debug!("send suppressed, request already in flight");
            return SendOutcome::Suppressed;
        };

        let session_id = self.ensure_session();
        let len = {
            let mut state = self.lock_state();
            state.history.push(Message::user(text.clone()));
            state.input.clear();
            state.history.len()
        };
        self.events.publish(SessionEvent::InputChanged);
        self.events.publish(SessionEvent::HistoryChanged { len });

        let request = ChatRequest {
            session_id: session_id.to_string(),
            message: text,
        };
        let request_id = new_correlation_id();
        debug!(%request_id, session = %session_id, "sending chat message");

        let outcome = match self.transport.send(&request).await {
            Ok(reply) => self.apply_reply(&session_id, reply),
            Err(e) => self.apply_failure(&session_id, e),
        };
        guard.settle();
        debug!(%request_id, ?outcome, "chat request finished");

        drop(guard);
        outcome
    }

    /// Adopt the server's identifier and history wholesale.
    fn apply_reply(&self, previous: &SessionId, reply: ChatReply) -> SendOutcome {
        let Some(current) = SessionId::parse(reply.session_id) else {
            return self.apply_failure(
                previous,
                ChatError::Parse("reply carried an empty sessionId".into()),
            );
        };

        let rotated = current != *previous;
        if rotated {
            info!(previous = %previous, current = %current, "server rotated session");
            self.persist(&current);
        }

        let len = {
            let mut state = self.lock_state();
            state.session_id = Some(current.clone());
            state.history = reply.history;
            state.history.len()
        };

        if rotated {
            self.events.publish(SessionEvent::SessionRotated {
                previous: previous.clone(),
                current,
            });
        }
        self.events.publish(SessionEvent::HistoryChanged { len });
        SendOutcome::Delivered
    }

    /// Append the error reply, or start over if the server ended the session.
    fn apply_failure(&self, previous: &SessionId, error: ChatError) -> SendOutcome {
        warn!(session = %previous, error = %error, "chat request failed");

        if !error.is_session_invalidated() {
            let len = {
                let mut state = self.lock_state();
                state.history.push(Message::model(self.error_reply.clone()));
                state.history.len()
            };
            self.events.publish(SessionEvent::HistoryChanged { len });
            return SendOutcome::Failed(error);
        }

        let mut current = SessionId::generate();
        while current == *previous {
            current = SessionId::generate();
        }
        self.persist(&current);
        info!(previous = %previous, current = %current, "session invalidated, starting over");

        {
            let mut state = self.lock_state();
            state.session_id = Some(current.clone());
            state.history.clear();
        }
        self.events.publish(SessionEvent::SessionRotated {
            previous: previous.clone(),
            current,
        });
        self.events.publish(SessionEvent::HistoryChanged { len: 0 });
        SendOutcome::SessionReset
    }
}
