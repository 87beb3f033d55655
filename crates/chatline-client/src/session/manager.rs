//! ChatSession struct, identifier lifecycle, and state access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chatline_common::{EventBus, SessionEvent, SessionId};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::store::SessionStore;
use crate::transport::ChatTransport;
use crate::Message;

use super::types::SessionSnapshot;

pub(crate) const DEFAULT_STORAGE_KEY: &str = "chatSessionId";
pub(crate) const DEFAULT_ERROR_REPLY: &str =
    "Sorry, I couldn't process your request. Please try again.";

#[derive(Debug, Default)]
pub(super) struct SessionState {
    pub(super) session_id: Option<SessionId>,
    pub(super) history: Vec<Message>,
    pub(super) input: String,
}

/// Client-side controller for one conversation with the chat endpoint.
pub struct ChatSession {
    pub(super) transport: Arc<dyn ChatTransport>,
    pub(super) store: Arc<dyn SessionStore>,
    /// Storage key the identifier is persisted under.
    pub(super) storage_key: String,
    /// Text of the model message appended when a request fails.
    pub(super) error_reply: String,
    pub(super) state: Mutex<SessionState>,
    /// Whether a request is in flight. Sole guard against concurrent sends.
    pub(super) loading: AtomicBool,
    pub(super) events: EventBus,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            store,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            error_reply: DEFAULT_ERROR_REPLY.to_string(),
            state: Mutex::new(SessionState::default()),
            loading: AtomicBool::new(false),
            events: EventBus::default(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_error_reply(mut self, text: impl Into<String>) -> Self {
        self.error_reply = text.into();
        self
    }

    /// Load the session identifier from storage, or generate and store one.
    ///
    /// Storage failures are logged, never returned: the identifier is still
    /// usable for this process even if it could not be persisted.
    pub fn init_session(&self) -> SessionId {
        let stored = match self.store.get(&self.storage_key) {
            Ok(value) => value.and_then(SessionId::parse),
            Err(e) => {
                warn!(error = %e, "failed to read session id from storage");
                self.lock_state().session_id.clone()
            }
        };

        let id = match stored {
            Some(id) => {
                debug!(session = %id, "resumed session");
                id
            }
            None => {
                let id = SessionId::generate();
                self.persist(&id);
                info!(session = %id, "started new session");
                id
            }
        };

        self.lock_state().session_id = Some(id.clone());
        self.events.publish(SessionEvent::SessionStarted(id.clone()));
        id
    }

    /// Replace the pending input text.
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock_state().input = text.into();
        self.events.publish(SessionEvent::InputChanged);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock_state();
        SessionSnapshot {
            session_id: state.session_id.clone(),
            history: state.history.clone(),
            input: state.input.clone(),
            loading: self.is_loading(),
        }
    }

    /// Receive a notification for every state change.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.lock_state().session_id.clone()
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock_state().history.clone()
    }

    pub fn input(&self) -> String {
        self.lock_state().input.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Current identifier, initializing the session first if needed.
    pub(super) fn ensure_session(&self) -> SessionId {
        let current = self.lock_state().session_id.clone();
        match current {
            Some(id) => id,
            None => self.init_session(),
        }
    }

    pub(super) fn persist(&self, id: &SessionId) {
        if let Err(e) = self.store.set(&self.storage_key, id.as_str()) {
            warn!(session = %id, error = %e, "failed to persist session id");
        }
    }

    pub(super) fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
