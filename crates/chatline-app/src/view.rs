//! Terminal transcript rendering.
//!
//! The view keeps track of how much of the history it already printed and
//! turns each session snapshot into the lines still missing.

use chatline_client::{Message, Role, SessionSnapshot};

#[derive(Debug, Default)]
pub struct TranscriptView {
    /// History as it was last printed.
    shown: Vec<Message>,
    /// A session rotation was observed and not yet rendered.
    rotated: bool,
    loading: bool,
}

impl TranscriptView {
    /// Note that the session identifier changed.
    pub fn session_rotated(&mut self) {
        self.rotated = true;
    }

    /// Lines to print so the terminal reflects `snapshot`.
    ///
    /// Messages already printed are skipped. After a session rotation that
    /// does not continue the printed history, a divider is printed and the
    /// new history starts from the top.
    pub fn render(&mut self, snapshot: &SessionSnapshot) -> Vec<String> {
        let mut lines = Vec::new();

        let kept = common_prefix_len(&self.shown, &snapshot.history);
        let start = if std::mem::take(&mut self.rotated)
            && (snapshot.history.is_empty() || kept < self.shown.len())
        {
            lines.push("--- new conversation ---".to_string());
            0
        } else {
            kept
        };

        lines.extend(snapshot.history[start..].iter().map(format_message));
        self.shown = snapshot.history.clone();

        if snapshot.loading && !self.loading {
            lines.push("    ...".to_string());
        }
        self.loading = snapshot.loading;

        lines
    }
}

fn common_prefix_len(a: &[Message], b: &[Message]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

pub fn format_message(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Model => "bot",
    };
    format!("{speaker}> {}", message.text())
}

/// The whole conversation, for `/history`.
pub fn format_transcript(snapshot: &SessionSnapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(snapshot.history.len() + 1);
    if let Some(id) = &snapshot.session_id {
        lines.push(format!("--- session {id} ---"));
    }
    lines.extend(snapshot.history.iter().map(format_message));
    lines
}
