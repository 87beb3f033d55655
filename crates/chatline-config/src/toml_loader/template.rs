//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Chatline Configuration
# Only override what you want to change -- missing fields use defaults.

[endpoint]
base_url = "http://localhost:3000"
# chat_path = "/api/chat"
# connect_timeout_secs = 10    # unset: HTTP client default
# request_timeout_secs = 120   # unset: HTTP client default

[storage]
# backend = "file"             # file | memory
# path = "/path/to/session.json"
# key = "chatSessionId"

[messages]
# error_reply = "Sorry, I couldn't process your request. Please try again."

[logging]
# level = "info"               # trace | debug | info | warn | error
"##
    .to_string()
}
