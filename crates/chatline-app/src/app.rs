//! Wiring: config to session, and the interactive loop.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chatline_client::{
    ChatSession, FileStore, HttpTransport, HttpTransportConfig, MemoryStore, SendOutcome,
    SessionStore,
};
use chatline_common::{ChatlineError, ConfigError, SessionEvent};
use chatline_config::{toml_loader, ChatlineConfig, ConfigOverrides, StorageBackend};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::view::{format_transcript, TranscriptView};

/// A line typed by the user.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Send(String),
    History,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            "/quit" | "/exit" => Command::Quit,
            "/history" => Command::History,
            _ => Command::Send(line.to_string()),
        }
    }
}

/// Build the session controller described by `config`.
pub fn build_session(
    config: &ChatlineConfig,
    memory_only: bool,
) -> chatline_common::Result<ChatSession> {
    let endpoint = &config.endpoint;
    let mut transport_config = HttpTransportConfig::new(endpoint.chat_url());
    if let Some(secs) = endpoint.connect_timeout_secs {
        transport_config = transport_config.with_connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = endpoint.request_timeout_secs {
        transport_config = transport_config.with_request_timeout(Duration::from_secs(secs));
    }
    let transport =
        HttpTransport::new(transport_config).map_err(|e| ChatlineError::Chat(e.to_string()))?;

    let use_memory = memory_only || config.storage.backend == StorageBackend::Memory;
    let store: Arc<dyn SessionStore> = if use_memory {
        debug!("session id kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        let path = match &config.storage.path {
            Some(path) => path.clone(),
            None => toml_loader::default_storage_path()?,
        };
        debug!(path = %path.display(), "session id stored on disk");
        Arc::new(FileStore::new(path))
    };

    Ok(ChatSession::new(Arc::new(transport), store)
        .with_storage_key(config.storage.key.clone())
        .with_error_reply(config.messages.error_reply.clone()))
}

/// Load the config named by the command line, with `--base-url` applied
/// before validation.
pub fn resolve_config(args: &Args) -> Result<ChatlineConfig, ConfigError> {
    let overrides = ConfigOverrides {
        base_url: args.base_url.clone(),
    };
    chatline_config::load_config(args.config.as_deref(), &overrides)
}

/// Run the interactive chat on stdin/stdout until `/quit` or end of input.
pub async fn run(config: ChatlineConfig, memory_only: bool) -> chatline_common::Result<()> {
    let session = Arc::new(build_session(&config, memory_only)?);
    let id = session.init_session();
    info!(session = %id, endpoint = %config.endpoint.chat_url(), "chat ready");

    println!(
        "Chatting with {}. Type a message, /history to reprint, /quit to exit.",
        config.endpoint.chat_url()
    );

    let stdin = BufReader::new(tokio::io::stdin());
    chat_loop(session, stdin, &mut std::io::stdout()).await?;
    info!("chat closed");
    Ok(())
}

/// Read commands from `input` and print the transcript to `out`.
///
/// Sends run as tasks so the transcript keeps redrawing while a reply is
/// pending. On `/quit` or end of input every in-flight send is awaited and
/// its result printed before returning.
pub async fn chat_loop<R, W>(
    session: Arc<ChatSession>,
    input: R,
    out: &mut W,
) -> chatline_common::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut events = session.subscribe();
    let mut view = TranscriptView::default();
    let mut lines = input.lines();
    let mut sends: JoinSet<SendOutcome> = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Empty => {}
                    Command::Quit => break,
                    Command::History => {
                        for row in format_transcript(&session.snapshot()) {
                            writeln!(out, "{row}")?;
                        }
                    }
                    Command::Send(text) => {
                        let session = session.clone();
                        sends.spawn(async move { session.send_message(text).await });
                    }
                }
            }
            Some(joined) = sends.join_next(), if !sends.is_empty() => {
                report(joined, out)?;
            }
            event = events.recv() => {
                redraw(&mut view, &session, event.ok(), out)?;
            }
        }
    }

    while let Some(joined) = sends.join_next().await {
        report(joined, out)?;
    }
    loop {
        match events.try_recv() {
            Ok(event) => redraw(&mut view, &session, Some(event), out)?,
            Err(TryRecvError::Lagged(_)) => redraw(&mut view, &session, None, out)?,
            Err(_) => break,
        }
    }
    out.flush()?;
    Ok(())
}

/// Print whatever the view has not shown yet. `None` means events were
/// missed and the snapshot is rendered unconditionally.
fn redraw<W: Write>(
    view: &mut TranscriptView,
    session: &ChatSession,
    event: Option<SessionEvent>,
    out: &mut W,
) -> std::io::Result<()> {
    match event {
        Some(SessionEvent::InputChanged) => return Ok(()),
        Some(SessionEvent::SessionRotated { .. }) => view.session_rotated(),
        _ => {}
    }
    for line in view.render(&session.snapshot()) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn report<W: Write>(joined: Result<SendOutcome, JoinError>, out: &mut W) -> std::io::Result<()> {
    match joined {
        Ok(SendOutcome::Suppressed) => writeln!(out, "(still waiting for the previous reply)"),
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(error = %e, "send task did not finish");
            Ok(())
        }
    }
}
