//! # Storage Backend
//!
//! Durable key → bytes substrate used by the schema and record stores.
//! Keys are flat file names; the catalog derives them from validated
//! database names only.

mod errors;
mod local;
mod memory;

pub use errors::{BackendError, BackendResult};
pub use local::LocalBackend;
pub use memory::MemoryBackend;

/// Backend trait for database artifacts
pub trait StorageBackend: std::fmt::Debug {
    /// Read the full contents stored under `key`
    fn read(&self, key: &str) -> BackendResult<Vec<u8>>;

    /// Replace the contents stored under `key`
    fn write(&self, key: &str, data: &[u8]) -> BackendResult<()>;

    /// Remove `key`. Returns `NotFound` if it was absent.
    fn delete(&self, key: &str) -> BackendResult<()>;

    /// Check if `key` exists
    fn exists(&self, key: &str) -> BackendResult<bool>;

    /// List keys starting with `prefix`
    fn list(&self, prefix: &str) -> BackendResult<Vec<String>>;
}

/// Outcome of removing a single artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The key existed and was deleted
    Removed,
    /// Nothing was stored under the key
    Absent,
}

impl Removal {
    pub fn was_removed(&self) -> bool {
        matches!(self, Removal::Removed)
    }
}
