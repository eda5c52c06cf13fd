//! Error types shared by the schema store, record store and catalog
//!
//! Every failure is a typed outcome returned to the immediate caller.
//! Nothing in the storage layer terminates the process.
//!
//! Error codes:
//! - FLATDB_NOT_FOUND
//! - FLATDB_CORRUPT
//! - FLATDB_PERSISTENCE
//! - FLATDB_INDEX_OUT_OF_RANGE
//! - FLATDB_VALIDATION
//! - FLATDB_ALREADY_EXISTS
//! - FLATDB_INVALID_NAME
//! - FLATDB_NO_RECORDS

use std::fmt;

use thiserror::Error;

/// Details of a rejected value or field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field the failure refers to
    pub field: String,
    /// Expected condition
    pub expected: String,
    /// What was found instead
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Value longer than the declared maximum
    pub fn too_long(field: impl Into<String>, max_length: usize, actual_length: usize) -> Self {
        Self::new(
            field,
            format!("at most {} characters", max_length),
            format!("{} characters", actual_length),
        )
    }

    pub fn empty_field_name() -> Self {
        Self::new("", "non-empty field name", "empty name")
    }

    pub fn duplicate_field(field: impl Into<String>) -> Self {
        Self::new(field, "unique field name", "duplicate")
    }

    pub fn non_positive_length(field: impl Into<String>, length: i64) -> Self {
        Self::new(field, "positive maximum length", length.to_string())
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::new(field, "field declared in schema", "undeclared field")
    }

    pub fn no_fields() -> Self {
        Self::new("$schema", "at least one field", "no fields")
    }

    pub fn empty_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-empty value", "empty value")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Errors produced by flatdb storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlatDbError {
    /// Requested schema or database is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored representation could not be parsed
    #[error("Corrupt data in '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Write or delete against the backend failed
    #[error("Persistence failure on '{key}': {reason}")]
    Persistence { key: String, reason: String },

    /// Record position outside `0..len`
    #[error("Record index {index} out of range (database has {len} records)")]
    IndexOutOfRange { index: i64, len: usize },

    /// Value or field definition rejected
    #[error("Validation failed: {0}")]
    Validation(ValidationDetails),

    /// Database with this name is already present
    #[error("Database '{0}' already exists")]
    AlreadyExists(String),

    /// Database name cannot be used as a storage key
    #[error("Invalid database name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Table rendering was asked for an empty sequence
    #[error("No records found")]
    NoRecords,
}

impl FlatDbError {
    pub fn corrupt(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn persistence(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Persistence {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "FLATDB_NOT_FOUND",
            Self::Corrupt { .. } => "FLATDB_CORRUPT",
            Self::Persistence { .. } => "FLATDB_PERSISTENCE",
            Self::IndexOutOfRange { .. } => "FLATDB_INDEX_OUT_OF_RANGE",
            Self::Validation(_) => "FLATDB_VALIDATION",
            Self::AlreadyExists(_) => "FLATDB_ALREADY_EXISTS",
            Self::InvalidName { .. } => "FLATDB_INVALID_NAME",
            Self::NoRecords => "FLATDB_NO_RECORDS",
        }
    }
}

impl From<ValidationDetails> for FlatDbError {
    fn from(details: ValidationDetails) -> Self {
        Self::Validation(details)
    }
}

/// Result type for flatdb operations
pub type FlatDbResult<T> = Result<T, FlatDbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FlatDbError::NotFound("x".into()).code(), "FLATDB_NOT_FOUND");
        assert_eq!(FlatDbError::corrupt("k", "bad").code(), "FLATDB_CORRUPT");
        assert_eq!(FlatDbError::persistence("k", "disk").code(), "FLATDB_PERSISTENCE");
        assert_eq!(
            FlatDbError::IndexOutOfRange { index: 3, len: 1 }.code(),
            "FLATDB_INDEX_OUT_OF_RANGE"
        );
        assert_eq!(FlatDbError::NoRecords.code(), "FLATDB_NO_RECORDS");
    }

    #[test]
    fn test_validation_display() {
        let err: FlatDbError = ValidationDetails::too_long("phone", 15, 20).into();
        let display = err.to_string();
        assert!(display.contains("phone"));
        assert!(display.contains("at most 15"));
        assert!(display.contains("20 characters"));
    }
}
