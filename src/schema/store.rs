//! Schema store: durable field definitions, one artifact per database
//!
//! - Schemas are stored at `<name>_system.json`
//! - Missing schema → `NotFound`, unparseable schema → `Corrupt`
//! - No caching; every call reflects the backend's current state

use crate::backend::{BackendError, Removal, StorageBackend};
use crate::codec::{to_pretty_json, DEFAULT_INDENT};
use crate::database::DatabaseName;
use crate::errors::{FlatDbError, FlatDbResult};
use crate::observability::{log_event_with_fields, Event};

use super::types::Schema;

/// Reads and writes schema artifacts through a storage backend.
pub struct SchemaStore<'a, B: StorageBackend> {
    backend: &'a B,
    indent: usize,
}

impl<'a, B: StorageBackend> SchemaStore<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            indent: DEFAULT_INDENT,
        }
    }

    /// Sets the indentation width of written files
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Persists `schema` under `name`, overwriting any previous schema.
    ///
    /// Single attempt; a failed write is reported, not retried.
    pub fn create(&self, name: &DatabaseName, schema: &Schema) -> FlatDbResult<()> {
        let key = name.schema_key();
        let bytes =
            to_pretty_json(schema, self.indent).map_err(|e| FlatDbError::persistence(&key, e))?;
        self.backend
            .write(&key, &bytes)
            .map_err(|e| FlatDbError::persistence(&key, e))
    }

    /// Loads the schema of `name`.
    pub fn load(&self, name: &DatabaseName) -> FlatDbResult<Schema> {
        let key = name.schema_key();
        let bytes = self.backend.read(&key).map_err(|e| match e {
            BackendError::NotFound(_) => {
                FlatDbError::NotFound(format!("schema for database '{}'", name))
            }
            BackendError::Io(msg) => FlatDbError::persistence(&key, msg),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            let reason = e.to_string();
            log_event_with_fields(
                Event::SchemaCorrupt,
                &[("database", name.as_str()), ("reason", reason.as_str())],
            );
            FlatDbError::corrupt(&key, reason)
        })
    }

    /// Whether a schema artifact is present for `name`
    pub fn exists(&self, name: &DatabaseName) -> bool {
        self.backend.exists(&name.schema_key()).unwrap_or(false)
    }

    /// Removes the schema artifact. Deleting a missing schema reports `Absent`.
    pub fn delete(&self, name: &DatabaseName) -> FlatDbResult<Removal> {
        let key = name.schema_key();
        match self.backend.delete(&key) {
            Ok(()) => Ok(Removal::Removed),
            Err(BackendError::NotFound(_)) => Ok(Removal::Absent),
            Err(e) => Err(FlatDbError::persistence(key, e)),
        }
    }
}
