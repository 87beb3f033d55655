//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` so a user can fix
//! them in one pass.

use crate::schema::ChatlineConfig;
use chatline_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_endpoint(&mut errors, config);
    validate_storage(&mut errors, config);

    if config.messages.error_reply.trim().is_empty() {
        errors.push("messages.error_reply must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_endpoint(errors: &mut Vec<String>, config: &ChatlineConfig) {
    let endpoint = &config.endpoint;

    let base = endpoint.base_url.trim();
    if base.is_empty() {
        errors.push("endpoint.base_url must not be empty".into());
    } else if !(base.starts_with("http://") || base.starts_with("https://")) {
        errors.push(format!(
            "endpoint.base_url = {base:?} must start with http:// or https://"
        ));
    }

    if !endpoint.chat_path.starts_with('/') {
        errors.push(format!(
            "endpoint.chat_path = {:?} must start with '/'",
            endpoint.chat_path
        ));
    }

    for (name, value) in [
        ("endpoint.connect_timeout_secs", endpoint.connect_timeout_secs),
        ("endpoint.request_timeout_secs", endpoint.request_timeout_secs),
    ] {
        if value == Some(0) {
            errors.push(format!("{name} must be greater than 0"));
        }
    }
}

fn validate_storage(errors: &mut Vec<String>, config: &ChatlineConfig) {
    if config.storage.key.trim().is_empty() {
        errors.push("storage.key must not be empty".into());
    }
}
