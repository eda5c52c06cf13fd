//! Open database handle
//!
//! Holds the schema loaded once per session and validates every write
//! against it before handing the record to the record store. Records are
//! never cached; each call goes back to the backend.

use crate::backend::StorageBackend;
use crate::errors::{FlatDbError, FlatDbResult};
use crate::records::{render_table, Record, RecordStore};
use crate::schema::{Schema, SchemaValidator};

use super::catalog::Catalog;
use super::name::DatabaseName;

/// An open database: name plus its schema
pub struct Database<'a, B: StorageBackend> {
    catalog: &'a Catalog<B>,
    name: DatabaseName,
    schema: Schema,
}

impl<'a, B: StorageBackend> Database<'a, B> {
    pub(crate) fn new(catalog: &'a Catalog<B>, name: DatabaseName, schema: Schema) -> Self {
        Self {
            catalog,
            name,
            schema,
        }
    }

    pub fn name(&self) -> &DatabaseName {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn store(&self) -> RecordStore<'a, B> {
        self.catalog.records()
    }

    /// Current records, re-read from the backend
    pub fn records(&self) -> FlatDbResult<Vec<Record>> {
        self.store().load(&self.name)
    }

    pub fn len(&self) -> FlatDbResult<usize> {
        self.store().len(&self.name)
    }

    pub fn is_empty(&self) -> FlatDbResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Validates and appends a record; returns its index.
    ///
    /// Fields missing from `record` are stored as empty strings.
    pub fn add_record(&self, record: &Record) -> FlatDbResult<usize> {
        let record = SchemaValidator::new(&self.schema).validate_record(record)?;
        self.store().append(&self.name, record)
    }

    /// Validates `values` and merges them into the record at `index`.
    pub fn edit_record(&self, index: usize, values: &Record) -> FlatDbResult<Record> {
        SchemaValidator::new(&self.schema).validate_update(values)?;
        self.store().update_at(&self.name, index, values)
    }

    /// Removes the record at `index`.
    pub fn delete_record(&self, index: usize) -> FlatDbResult<Record> {
        self.store().remove_at(&self.name, index)
    }

    /// Renders all records as a table, or `NoRecords`
    pub fn render(&self) -> FlatDbResult<String> {
        render_table(&self.records()?)
    }

    /// Converts a 1-based record number into a checked 0-based index.
    pub fn record_index(&self, number: i64) -> FlatDbResult<usize> {
        let len = self.len()?;
        let index = number.saturating_sub(1);
        match usize::try_from(index) {
            Ok(i) if i < len => Ok(i),
            _ => Err(FlatDbError::IndexOutOfRange { index, len }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn setup() -> Catalog<MemoryBackend> {
        let catalog = Catalog::new(MemoryBackend::new());
        catalog
            .create_database(
                &DatabaseName::parse("contacts").unwrap(),
                &Schema::new([("name", 5), ("phone", 8)]).unwrap(),
            )
            .unwrap();
        catalog
    }

    fn open(catalog: &Catalog<MemoryBackend>) -> Database<'_, MemoryBackend> {
        catalog.open(&DatabaseName::parse("contacts").unwrap()).unwrap()
    }

    #[test]
    fn test_add_record_validates_length() {
        let catalog = setup();
        let db = open(&catalog);

        let err = db
            .add_record(&Record::from_pairs([("name", "Annabel")]))
            .unwrap_err();
        assert!(matches!(err, FlatDbError::Validation(_)));
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn test_add_record_fills_missing_fields() {
        let catalog = setup();
        let db = open(&catalog);

        db.add_record(&Record::from_pairs([("phone", "555")])).unwrap();
        assert_eq!(
            db.records().unwrap(),
            vec![Record::from_pairs([("name", ""), ("phone", "555")])]
        );
    }

    #[test]
    fn test_edit_record_rejects_unknown_field() {
        let catalog = setup();
        let db = open(&catalog);
        db.add_record(&Record::from_pairs([("name", "Ann"), ("phone", "1")]))
            .unwrap();

        assert!(db
            .edit_record(0, &Record::from_pairs([("email", "a@b")]))
            .is_err());
    }

    #[test]
    fn test_record_index_bounds() {
        let catalog = setup();
        let db = open(&catalog);
        db.add_record(&Record::from_pairs([("name", "Ann")])).unwrap();

        assert_eq!(db.record_index(1).unwrap(), 0);
        assert_eq!(
            db.record_index(0).unwrap_err(),
            FlatDbError::IndexOutOfRange { index: -1, len: 1 }
        );
        assert!(db.record_index(2).is_err());
        assert!(db.record_index(-4).is_err());
    }

    #[test]
    fn test_render_empty() {
        let catalog = setup();
        assert_eq!(open(&catalog).render(), Err(FlatDbError::NoRecords));
    }

    #[test]
    fn test_sees_external_changes() {
        let catalog = setup();
        let db = open(&catalog);
        catalog
            .records()
            .append(db.name(), Record::from_pairs([("name", "Bob")]))
            .unwrap();

        assert_eq!(db.len().unwrap(), 1);
    }

    #[test]
    fn test_unreadable_records_block_mutations() {
        let catalog = setup();
        let db = open(&catalog);
        db.add_record(&Record::from_pairs([("name", "Ann")])).unwrap();
        catalog.backend().fail_reads_from("contacts_data.json");

        assert!(matches!(db.render(), Err(FlatDbError::Persistence { .. })));
        assert!(db.record_index(1).is_err());
        assert!(db.add_record(&Record::from_pairs([("name", "Bob")])).is_err());

        catalog.backend().heal_reads_from("contacts_data.json");
        assert_eq!(db.len().unwrap(), 1);
    }
}
