//! Schema type definitions
//!
//! A schema is an ordered list of fixed-width text fields. On disk it is a
//! JSON object mapping field name → maximum length, in definition order.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{FlatDbResult, ValidationDetails};

/// A single field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name, unique within the schema
    pub name: String,
    /// Maximum value length in characters
    pub max_length: usize,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, max_length: usize) -> Self {
        Self {
            name: name.into(),
            max_length,
        }
    }
}

/// Immutable field definitions of one database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Builds a schema from `(name, max_length)` pairs.
    ///
    /// Rejects an empty list, empty or duplicate names and
    /// non-positive lengths.
    pub fn new<I, S>(fields: I) -> FlatDbResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut builder = SchemaBuilder::new();
        for (name, max_length) in fields {
            builder.add_field(name, max_length)?;
        }
        builder.build()
    }

    /// Fields in definition order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Maximum length of `field`, if declared
    pub fn max_length(&self, field: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.max_length)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.max_length(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a built schema
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", field.name, field.max_length)?;
        }
        write!(f, "}}")
    }
}

/// Incremental schema definition with per-field validation
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. On error the builder is left unchanged.
    pub fn add_field(&mut self, name: impl Into<String>, max_length: i64) -> FlatDbResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationDetails::empty_field_name().into());
        }
        if self.fields.iter().any(|f| f.name == name) {
            return Err(ValidationDetails::duplicate_field(name).into());
        }
        if max_length <= 0 {
            return Err(ValidationDetails::non_positive_length(name, max_length).into());
        }
        self.fields.push(FieldDef::new(name, max_length as usize));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finishes the definition; at least one field is required
    pub fn build(self) -> FlatDbResult<Schema> {
        if self.fields.is_empty() {
            return Err(ValidationDetails::no_fields().into());
        }
        Ok(Schema {
            fields: self.fields,
        })
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.max_length)?;
        }
        map.end()
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object mapping field names to positive integer lengths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
        let mut builder = SchemaBuilder::new();
        while let Some((name, max_length)) = access.next_entry::<String, i64>()? {
            builder.add_field(name, max_length).map_err(de::Error::custom)?;
        }
        builder.build().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FlatDbError;

    fn contacts() -> Schema {
        Schema::new([("name", 20), ("phone", 15)]).unwrap()
    }

    #[test]
    fn test_definition_order_preserved() {
        let schema = Schema::new([("zeta", 1), ("alpha", 2), ("mid", 3)]).unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_max_length_lookup() {
        let schema = contacts();
        assert_eq!(schema.max_length("phone"), Some(15));
        assert_eq!(schema.max_length("email"), None);
    }

    #[test]
    fn test_builder_rejects_bad_fields() {
        let mut builder = SchemaBuilder::new();
        builder.add_field("name", 10).unwrap();

        assert!(matches!(builder.add_field("", 5), Err(FlatDbError::Validation(_))));
        assert!(matches!(builder.add_field("name", 5), Err(FlatDbError::Validation(_))));
        assert!(matches!(builder.add_field("age", 0), Err(FlatDbError::Validation(_))));
        assert!(matches!(builder.add_field("age", -3), Err(FlatDbError::Validation(_))));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let result = SchemaBuilder::new().build();
        assert!(matches!(result, Err(FlatDbError::Validation(_))));
    }

    #[test]
    fn test_deserialize_rejects_invalid_lengths() {
        assert!(serde_json::from_str::<Schema>(r#"{"a": 0}"#).is_err());
        assert!(serde_json::from_str::<Schema>(r#"{"a": "ten"}"#).is_err());
        assert!(serde_json::from_str::<Schema>(r#"{"a": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Schema>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<Schema>(r#"["a"]"#).is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_keys() {
        assert!(serde_json::from_str::<Schema>(r#"{"a": 1, "a": 2}"#).is_err());
    }

    #[test]
    fn test_display_matches_dict_style() {
        assert_eq!(contacts().to_string(), "{'name': 20, 'phone': 15}");
    }
}
