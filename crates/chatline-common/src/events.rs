use tokio::sync::broadcast;

use crate::id::SessionId;

/// State-change notifications emitted by a chat session.
///
/// Events describe *what* changed; views read the full state from the
/// session's snapshot when they redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session identifier was loaded from storage or generated.
    SessionStarted(SessionId),
    /// The identifier changed, either rotated by the server or replaced
    /// after invalidation.
    SessionRotated {
        previous: SessionId,
        current: SessionId,
    },
    InputChanged,
    HistoryChanged { len: usize },
    LoadingChanged(bool),
}

pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: SessionEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
