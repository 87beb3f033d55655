//! Persistent key-value storage for the session identifier.

mod file;
mod memory;

use chatline_common::StorageError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Small synchronous key-value store.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
