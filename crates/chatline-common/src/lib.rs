pub mod errors;
pub mod events;
pub mod id;

pub use errors::{ChatlineError, ConfigError, StorageError};
pub use events::{EventBus, SessionEvent};
pub use id::{new_correlation_id, new_id, SessionId};

pub type Result<T> = std::result::Result<T, ChatlineError>;
