//! Catalog: database lifecycle over a shared backend
//!
//! Keeps the schema artifact and the data artifact of each database
//! paired by name.
//!
//! - A database exists iff both artifacts are present
//! - Creation writes the empty data file first and the schema last, so a
//!   listed schema always had its data file written
//! - Deletion removes each artifact independently

use crate::backend::{Removal, StorageBackend};
use crate::codec::DEFAULT_INDENT;
use crate::errors::{FlatDbError, FlatDbResult};
use crate::observability::{log_event_with_fields, Event};
use crate::records::RecordStore;
use crate::schema::{Schema, SchemaStore};

use super::handle::Database;
use super::name::{DatabaseName, SCHEMA_SUFFIX};

/// Per-artifact outcome of `delete_database`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteReport {
    pub data: Removal,
    pub schema: Removal,
}

impl DeleteReport {
    /// Neither artifact was present
    pub fn is_not_found(&self) -> bool {
        !self.data.was_removed() && !self.schema.was_removed()
    }
}

/// Entry point for creating, opening, listing and deleting databases.
#[derive(Debug)]
pub struct Catalog<B: StorageBackend> {
    backend: B,
    indent: usize,
}

impl<B: StorageBackend> Catalog<B> {
    pub fn new(backend: B) -> Self {
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

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn schemas(&self) -> SchemaStore<'_, B> {
        SchemaStore::new(&self.backend).with_indent(self.indent)
    }

    pub fn records(&self) -> RecordStore<'_, B> {
        RecordStore::new(&self.backend).with_indent(self.indent)
    }

    /// Whether both artifacts of `name` are present
    pub fn exists(&self, name: &DatabaseName) -> bool {
        self.schemas().exists(name) && self.records().exists(name)
    }

    /// Creates a database with an empty record sequence.
    ///
    /// Fails with `AlreadyExists` rather than overwriting.
    pub fn create_database(&self, name: &DatabaseName, schema: &Schema) -> FlatDbResult<()> {
        if self.exists(name) {
            return Err(FlatDbError::AlreadyExists(name.to_string()));
        }

        if let Err(e) = self.records().save(name, &[]) {
            self.log_create_failure(name, &e);
            return Err(e);
        }

        if let Err(e) = self.schemas().create(name, schema) {
            // Without a schema the data file is unreachable; drop it
            let _ = self.records().delete(name);
            self.log_create_failure(name, &e);
            return Err(e);
        }

        log_event_with_fields(
            Event::DatabaseCreated,
            &[
                ("database", name.as_str()),
                ("fields", schema.len().to_string().as_str()),
            ],
        );
        Ok(())
    }

    /// Removes both artifacts of `name`.
    ///
    /// Each removal is attempted even if the other fails. A missing
    /// artifact is reported in the result, not as an error.
    pub fn delete_database(&self, name: &DatabaseName) -> FlatDbResult<DeleteReport> {
        let data = self.records().delete(name);
        let schema = self.schemas().delete(name);

        let report = DeleteReport {
            data: data?,
            schema: schema?,
        };
        log_event_with_fields(
            Event::DatabaseDeleted,
            &[
                ("data", removal_str(report.data)),
                ("database", name.as_str()),
                ("schema", removal_str(report.schema)),
            ],
        );
        Ok(report)
    }

    /// Names of all databases with a schema artifact, sorted.
    ///
    /// A data file without a schema is not listed.
    pub fn list_databases(&self) -> FlatDbResult<Vec<DatabaseName>> {
        let keys = self
            .backend
            .list("")
            .map_err(|e| FlatDbError::persistence(format!("*{}", SCHEMA_SUFFIX), e))?;

        let mut names: Vec<DatabaseName> = keys
            .iter()
            .filter_map(|key| DatabaseName::from_schema_key(key))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Opens an existing database, loading its schema once.
    pub fn open(&self, name: &DatabaseName) -> FlatDbResult<Database<'_, B>> {
        if !self.exists(name) {
            return Err(FlatDbError::NotFound(format!("database '{}'", name)));
        }
        let schema = self.schemas().load(name)?;
        Ok(Database::new(self, name.clone(), schema))
    }

    fn log_create_failure(&self, name: &DatabaseName, err: &FlatDbError) {
        let reason = err.to_string();
        log_event_with_fields(
            Event::DatabaseCreateFailed,
            &[("database", name.as_str()), ("reason", reason.as_str())],
        );
    }
}

fn removal_str(removal: Removal) -> &'static str {
    match removal {
        Removal::Removed => "removed",
        Removal::Absent => "absent",
    }
}
