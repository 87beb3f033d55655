//! Chatline configuration system.
//!
//! TOML-based configuration with serde defaults, environment and
//! command-line overrides for the endpoint base URL, and validation.
//! Partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatline_config::{load_config, ConfigOverrides};
//!
//! let config = load_config(None, &ConfigOverrides::default()).expect("failed to load config");
//! println!("{}", config.endpoint.chat_url());
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ChatlineConfig, EndpointConfig, LogLevel, StorageBackend, StorageConfig};

use chatline_common::ConfigError;
use std::path::Path;

/// Values supplied on the command line. They win over the file and the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ChatlineConfig) {
        if let Some(url) = &self.base_url {
            tracing::info!("endpoint base URL overridden on the command line");
            config.endpoint.base_url = url.trim().to_string();
        }
    }
}

/// Load, override, and validate the config.
///
/// With `path` set, that file must exist. Without it, `config.toml` is read
/// from the OS config directory and created with defaults if missing.
/// Overrides apply in order file, environment, command line; validation
/// runs last.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ChatlineConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    env::apply_env_overrides(&mut config);
    overrides.apply(&mut config);
    validation::validate(&config)?;
    Ok(config)
}
