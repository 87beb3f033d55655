mod app;
mod cli;
mod view;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Config is read before logging so its level can seed the filter
    let loaded = app::resolve_config(&args);
    let default_directive = match &loaded {
        Ok(config) => config.logging.level.as_directive(),
        Err(_) => "info",
    };

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or(default_directive);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("Chatline v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Config load failed: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = app::run(config, args.memory).await {
        tracing::error!("Chat failed: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
