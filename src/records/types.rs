//! Record type
//!
//! A record is an ordered field → text mapping, stored as a JSON object
//! whose values are all strings.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One row of a database. Identity is its position in the stored sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(field, value)` pairs; later duplicates win
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Value of `field`, or "" when the field was never set
    pub fn get(&self, field: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.iter().any(|(k, _)| k == field)
    }

    /// Sets `field`, keeping its position if already present
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == field) {
            Some(slot) => slot.1 = value,
            None => self.values.push((field, value)),
        }
    }

    /// Overwrites the fields present in `other`; all others keep their value
    pub fn merge(&mut self, other: &Record) {
        for (field, value) in other.iter() {
            self.set(field, value);
        }
    }

    /// Field names in stored order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in &self.values {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object mapping field names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((field, value)) = access.next_entry::<String, String>()? {
            if record.contains(&field) {
                return Err(de::Error::custom(format!("duplicate field '{}'", field)));
            }
            record.values.push((field, value));
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults_to_empty() {
        let record = Record::from_pairs([("name", "Ann")]);
        assert_eq!(record.get("name"), "Ann");
        assert_eq!(record.get("phone"), "");
        assert!(!record.contains("phone"));
    }

    #[test]
    fn test_set_keeps_position() {
        let mut record = Record::from_pairs([("a", "1"), ("b", "2")]);
        record.set("a", "9");
        record.set("c", "3");
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![("a", "9"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn test_merge_is_partial() {
        let mut record = Record::from_pairs([("name", "Ann"), ("phone", "555-0001")]);
        record.merge(&Record::from_pairs([("phone", "555-9999")]));
        assert_eq!(record, Record::from_pairs([("name", "Ann"), ("phone", "555-9999")]));
    }

    #[test]
    fn test_json_preserves_field_order() {
        let record = Record::from_pairs([("zip", "1"), ("city", "x")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zip":"1","city":"x"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_non_string_values_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"age": 3}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"a": "1", "a": "2"}"#).is_err());
    }
}
