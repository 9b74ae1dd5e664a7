//! Storage layer
//!
//! A key-value capability that the card `Store` persists through.
//!
//! ## Backends
//!
//! - **FileStore**: one JSON file per key, written atomically
//! - **MemoryStore**: in-process map, used by tests and scratch sessions
//!
//! Every call is fallible; callers decide whether a failure is fatal.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{FileOp, StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// A persistent key-value slot provider
///
/// Values are opaque strings; the card store keeps one JSON document per key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key)
    }
}
