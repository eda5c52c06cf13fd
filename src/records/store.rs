//! Record store: durable, positional record sequence per database
//!
//! Every mutation loads the whole sequence, changes it in memory and
//! rewrites the whole file. A missing or unparseable data file reads as
//! an empty sequence: record data is treated as recoverable, unlike the
//! schema.

use crate::backend::{BackendError, Removal, StorageBackend};
use crate::codec::{to_pretty_json, DEFAULT_INDENT};
use crate::database::DatabaseName;
use crate::errors::{FlatDbError, FlatDbResult};
use crate::observability::{log_event_with_fields, Event};

use super::types::Record;

/// Reads and writes record artifacts through a storage backend.
///
/// The store does no schema validation; callers validate first.
pub struct RecordStore<'a, B: StorageBackend> {
    backend: &'a B,
    indent: usize,
}

impl<'a, B: StorageBackend> RecordStore<'a, B> {
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

    /// Loads the record sequence, reporting absence and corruption.
    ///
    /// A data file that exists but cannot be read is a `Persistence` error.
    pub fn try_load(&self, name: &DatabaseName) -> FlatDbResult<Vec<Record>> {
        let key = name.data_key();
        let bytes = self.backend.read(&key).map_err(|e| match e {
            BackendError::NotFound(_) => {
                FlatDbError::NotFound(format!("data for database '{}'", name))
            }
            BackendError::Io(msg) => FlatDbError::persistence(&key, msg),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| FlatDbError::corrupt(&key, e))
    }

    /// Loads the record sequence; absent or unparseable data reads as empty.
    ///
    /// Read failures are returned, never folded into an empty sequence.
    pub fn load(&self, name: &DatabaseName) -> FlatDbResult<Vec<Record>> {
        match self.try_load(name) {
            Ok(records) => Ok(records),
            Err(FlatDbError::NotFound(_)) => {
                log_event_with_fields(Event::RecordsMissing, &[("database", name.as_str())]);
                Ok(Vec::new())
            }
            Err(e @ FlatDbError::Corrupt { .. }) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::RecordsCorrupt,
                    &[("database", name.as_str()), ("reason", reason.as_str())],
                );
                Ok(Vec::new())
            }
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::RecordsReadFailed,
                    &[("database", name.as_str()), ("reason", reason.as_str())],
                );
                Err(e)
            }
        }
    }

    /// Replaces the whole sequence with `records`.
    pub fn save(&self, name: &DatabaseName, records: &[Record]) -> FlatDbResult<()> {
        let key = name.data_key();
        let bytes =
            to_pretty_json(records, self.indent).map_err(|e| FlatDbError::persistence(&key, e))?;
        self.backend.write(&key, &bytes).map_err(|e| {
            let reason = e.to_string();
            log_event_with_fields(
                Event::RecordsSaveFailed,
                &[("database", name.as_str()), ("reason", reason.as_str())],
            );
            FlatDbError::persistence(&key, reason)
        })
    }

    /// Appends `record`; returns its index.
    pub fn append(&self, name: &DatabaseName, record: Record) -> FlatDbResult<usize> {
        let mut records = self.load(name)?;
        records.push(record);
        self.save(name, &records)?;

        let index = records.len() - 1;
        log_event_with_fields(
            Event::RecordAppended,
            &[("database", name.as_str()), ("index", index.to_string().as_str())],
        );
        Ok(index)
    }

    /// Merges `values` into the record at `index`; returns the updated record.
    ///
    /// Fields absent from `values` keep their previous value.
    pub fn update_at(
        &self,
        name: &DatabaseName,
        index: usize,
        values: &Record,
    ) -> FlatDbResult<Record> {
        let mut records = self.load(name)?;
        let len = records.len();
        let record = records
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;
        record.merge(values);
        let updated = record.clone();

        self.save(name, &records)?;
        log_event_with_fields(
            Event::RecordUpdated,
            &[("database", name.as_str()), ("index", index.to_string().as_str())],
        );
        Ok(updated)
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn remove_at(&self, name: &DatabaseName, index: usize) -> FlatDbResult<Record> {
        let mut records = self.load(name)?;
        if index >= records.len() {
            return Err(out_of_range(index, records.len()));
        }
        let removed = records.remove(index);

        self.save(name, &records)?;
        log_event_with_fields(
            Event::RecordRemoved,
            &[("database", name.as_str()), ("index", index.to_string().as_str())],
        );
        Ok(removed)
    }

    /// Number of stored records
    pub fn len(&self, name: &DatabaseName) -> FlatDbResult<usize> {
        Ok(self.load(name)?.len())
    }

    /// Whether a data artifact is present for `name`
    pub fn exists(&self, name: &DatabaseName) -> bool {
        self.backend.exists(&name.data_key()).unwrap_or(false)
    }

    /// Removes the data artifact. Deleting missing data reports `Absent`.
    pub fn delete(&self, name: &DatabaseName) -> FlatDbResult<Removal> {
        let key = name.data_key();
        match self.backend.delete(&key) {
            Ok(()) => Ok(Removal::Removed),
            Err(BackendError::NotFound(_)) => Ok(Removal::Absent),
            Err(e) => Err(FlatDbError::persistence(key, e)),
        }
    }
}

fn out_of_range(index: usize, len: usize) -> FlatDbError {
    FlatDbError::IndexOutOfRange {
        index: i64::try_from(index).unwrap_or(i64::MAX),
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn db() -> DatabaseName {
        DatabaseName::parse("contacts").unwrap()
    }

    fn person(name: &str, phone: &str) -> Record {
        Record::from_pairs([("name", name), ("phone", phone)])
    }

    #[test]
    fn test_missing_data_loads_empty() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);

        assert!(store.load(&db()).unwrap().is_empty());
        assert!(matches!(store.try_load(&db()), Err(FlatDbError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let backend = MemoryBackend::new();
        backend.write("contacts_data.json", b"[{\"name\": ").unwrap();
        let store = RecordStore::new(&backend);

        assert!(store.load(&db()).unwrap().is_empty());
        assert!(matches!(store.try_load(&db()), Err(FlatDbError::Corrupt { .. })));
    }

    #[test]
    fn test_save_load_roundtrip_keeps_order() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);
        let records = vec![person("Ann", "1"), person("Bob", "2"), person("Cy", "3")];

        store.save(&db(), &records).unwrap();
        assert_eq!(store.load(&db()).unwrap(), records);
    }

    #[test]
    fn test_append_returns_index() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);

        assert_eq!(store.append(&db(), person("Ann", "1")).unwrap(), 0);
        assert_eq!(store.append(&db(), person("Bob", "2")).unwrap(), 1);
        assert_eq!(store.len(&db()).unwrap(), 2);
        assert_eq!(store.load(&db()).unwrap()[1], person("Bob", "2"));
    }

    #[test]
    fn test_update_at_out_of_range() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);
        store.append(&db(), person("Ann", "1")).unwrap();

        let err = store
            .update_at(&db(), 1, &Record::from_pairs([("name", "X")]))
            .unwrap_err();
        assert_eq!(err, FlatDbError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn test_remove_at_out_of_range_leaves_data() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);
        store.append(&db(), person("Ann", "1")).unwrap();

        assert!(store.remove_at(&db(), 5).is_err());
        assert_eq!(store.len(&db()).unwrap(), 1);
    }

    #[test]
    fn test_failed_save_reports_persistence() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);
        store.append(&db(), person("Ann", "1")).unwrap();
        backend.fail_writes_to("contacts_data.json");

        let err = store.append(&db(), person("Bob", "2")).unwrap_err();
        assert_eq!(err.code(), "FLATDB_PERSISTENCE");

        backend.heal_writes_to("contacts_data.json");
        assert_eq!(store.len(&db()).unwrap(), 1);
    }

    #[test]
    fn test_unreadable_data_is_not_treated_as_empty() {
        let backend = MemoryBackend::new();
        let store = RecordStore::new(&backend);
        let records = vec![person("Ann", "1"), person("Bob", "2"), person("Cy", "3")];
        store.save(&db(), &records).unwrap();
        backend.fail_reads_from("contacts_data.json");

        assert_eq!(store.load(&db()).unwrap_err().code(), "FLATDB_PERSISTENCE");
        assert_eq!(store.try_load(&db()).unwrap_err().code(), "FLATDB_PERSISTENCE");
        assert!(store.append(&db(), person("Dee", "4")).is_err());
        assert!(store
            .update_at(&db(), 0, &Record::from_pairs([("name", "X")]))
            .is_err());
        assert!(store.remove_at(&db(), 0).is_err());

        backend.heal_reads_from("contacts_data.json");
        assert_eq!(store.load(&db()).unwrap(), records);
    }

    #[test]
    fn test_new_database_file_is_empty_array() {
        let backend = MemoryBackend::new();
        RecordStore::new(&backend).save(&db(), &[]).unwrap();
        assert_eq!(backend.read("contacts_data.json").unwrap(), b"[]");
    }
}
