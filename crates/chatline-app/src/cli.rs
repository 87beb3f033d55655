use clap::Parser;
use std::path::PathBuf;

/// Chatline: a terminal client for a remote chat service.
#[derive(Parser, Debug)]
#[command(name = "chatline", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chat service base URL, e.g. https://chat.example.com.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log filter directive override (e.g. debug, chatline_client=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Keep the session id in memory only.
    #[arg(long)]
    pub memory: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
