//! # In-Memory Backend
//!
//! Stands in for the filesystem in tests. Reads and writes can be made
//! to fail for selected keys to exercise persistence error paths.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use super::errors::{BackendError, BackendResult};
use super::StorageBackend;

/// In-memory key → bytes backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
    failing_writes: Mutex<BTreeSet<String>>,
    failing_reads: Mutex<BTreeSet<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `key` fail with an I/O error
    pub fn fail_writes_to(&self, key: impl Into<String>) {
        self.lock_failing().insert(key.into());
    }

    /// Stop injecting failures for `key`
    pub fn heal_writes_to(&self, key: &str) {
        self.lock_failing().remove(key);
    }

    /// Make every subsequent read of `key` fail with an I/O error
    pub fn fail_reads_from(&self, key: impl Into<String>) {
        lock_set(&self.failing_reads).insert(key.into());
    }

    pub fn heal_reads_from(&self, key: &str) {
        lock_set(&self.failing_reads).remove(key);
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // A poisoned map is still consistent: every mutation is a single insert/remove
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_failing(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        lock_set(&self.failing_writes)
    }
}

fn lock_set(set: &Mutex<BTreeSet<String>>) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
    set.lock().unwrap_or_else(|e| e.into_inner())
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> BackendResult<Vec<u8>> {
        if lock_set(&self.failing_reads).contains(key) {
            return Err(BackendError::Io(format!("injected read failure for {}", key)));
        }
        self.lock_entries()
            .get(key)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, data: &[u8]) -> BackendResult<()> {
        if self.lock_failing().contains(key) {
            return Err(BackendError::Io(format!("injected write failure for {}", key)));
        }
        self.lock_entries().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> BackendResult<()> {
        self.lock_entries()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| BackendError::NotFound(key.to_string()))
    }

    fn exists(&self, key: &str) -> BackendResult<bool> {
        Ok(self.lock_entries().contains_key(key))
    }

    fn list(&self, prefix: &str) -> BackendResult<Vec<String>> {
        Ok(self
            .lock_entries()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
