//! Record validation against a schema
//!
//! Validation happens at write time only. Records already on disk are
//! never re-checked when a schema is read.

use crate::errors::{FlatDbResult, ValidationDetails};
use crate::records::Record;

use super::types::Schema;

/// Validates records and partial updates against one schema.
///
/// The validator never mutates its input.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Checks a single value for `field`.
    ///
    /// Lengths are counted in characters. Empty values are allowed.
    pub fn validate_value(&self, field: &str, value: &str) -> FlatDbResult<()> {
        let max_length = self
            .schema
            .max_length(field)
            .ok_or_else(|| ValidationDetails::unknown_field(field))?;

        let length = value.chars().count();
        if length > max_length {
            return Err(ValidationDetails::too_long(field, max_length, length).into());
        }
        Ok(())
    }

    /// Validates a full record for insertion.
    ///
    /// Returns the record in schema order, with absent fields filled in
    /// as empty strings.
    pub fn validate_record(&self, record: &Record) -> FlatDbResult<Record> {
        for (field, value) in record.iter() {
            self.validate_value(field, value)?;
        }

        Ok(self
            .schema
            .field_names()
            .map(|name| (name, record.get(name)))
            .collect())
    }

    /// Validates the values of a partial update.
    pub fn validate_update(&self, values: &Record) -> FlatDbResult<()> {
        for (field, value) in values.iter() {
            self.validate_value(field, value)?;
        }
        Ok(())
    }
}
