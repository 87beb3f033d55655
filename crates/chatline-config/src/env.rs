//! Environment variable overrides applied on top of the file config.

use crate::schema::ChatlineConfig;
use tracing::info;

/// Overrides `endpoint.base_url`.
pub const BASE_URL_ENV: &str = "CHATLINE_BASE_URL";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut ChatlineConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

pub(crate) fn apply_overrides_from(
    config: &mut ChatlineConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        info!("endpoint base URL overridden by {BASE_URL_ENV}");
        config.endpoint.base_url = url.trim().to_string();
    }
}
