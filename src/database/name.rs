//! Database names and the storage keys derived from them
//!
//! A name is used verbatim as a file name prefix, so anything that could
//! escape the data directory or is not portable as a file name is rejected.

use std::fmt;

use crate::errors::{FlatDbError, FlatDbResult};

/// Suffix of the schema artifact
pub const SCHEMA_SUFFIX: &str = "_system.json";

/// Suffix of the record artifact
pub const DATA_SUFFIX: &str = "_data.json";

/// Longest accepted name, in characters
pub const MAX_NAME_LENGTH: usize = 64;

const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A validated database name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Validates `raw` as a database name.
    ///
    /// The caller is expected to have trimmed the input already.
    pub fn parse(raw: &str) -> FlatDbResult<Self> {
        if raw.is_empty() {
            return Err(FlatDbError::invalid_name(raw, "name cannot be empty"));
        }
        if raw == "." || raw == ".." {
            return Err(FlatDbError::invalid_name(raw, "name cannot be a relative path"));
        }
        if raw.chars().count() > MAX_NAME_LENGTH {
            return Err(FlatDbError::invalid_name(
                raw,
                format!("name longer than {} characters", MAX_NAME_LENGTH),
            ));
        }
        if let Some(c) = raw.chars().find(|c| RESERVED_CHARS.contains(c)) {
            return Err(FlatDbError::invalid_name(
                raw,
                format!("reserved character '{}'", c),
            ));
        }
        if raw.chars().any(char::is_control) {
            return Err(FlatDbError::invalid_name(raw, "control character in name"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the schema artifact, `<name>_system.json`
    pub fn schema_key(&self) -> String {
        format!("{}{}", self.0, SCHEMA_SUFFIX)
    }

    /// Key of the record artifact, `<name>_data.json`
    pub fn data_key(&self) -> String {
        format!("{}{}", self.0, DATA_SUFFIX)
    }

    /// Recovers the database name from a schema key.
    ///
    /// Keys whose prefix is not a valid name are skipped.
    pub fn from_schema_key(key: &str) -> Option<Self> {
        key.strip_suffix(SCHEMA_SUFFIX)
            .and_then(|raw| Self::parse(raw).ok())
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DatabaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for raw in ["contacts", "my db", "inventory-2024", "données"] {
            assert!(DatabaseName::parse(raw).is_ok(), "{} should be valid", raw);
        }
    }

    #[test]
    fn test_rejected_names() {
        for raw in ["", ".", "..", "a/b", "..\\x", "c:", "what?", "tab\tname"] {
            let err = DatabaseName::parse(raw).unwrap_err();
            assert_eq!(err.code(), "FLATDB_INVALID_NAME", "{:?}", raw);
        }
        assert!(DatabaseName::parse(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
        assert!(DatabaseName::parse(&"x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_keys() {
        let name = DatabaseName::parse("contacts").unwrap();
        assert_eq!(name.schema_key(), "contacts_system.json");
        assert_eq!(name.data_key(), "contacts_data.json");
    }

    #[test]
    fn test_from_schema_key() {
        assert_eq!(
            DatabaseName::from_schema_key("contacts_system.json").unwrap().as_str(),
            "contacts"
        );
        assert!(DatabaseName::from_schema_key("contacts_data.json").is_none());
        assert!(DatabaseName::from_schema_key("_system.json").is_none());
    }
}
