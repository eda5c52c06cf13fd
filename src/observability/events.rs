//! Observable events for flatdb
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in flatdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Process lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Interactive shell started
    ShellStart,
    /// Interactive shell exited
    ShellExit,

    // Database lifecycle
    /// Schema and data files written
    DatabaseCreated,
    /// Database creation failed part-way
    DatabaseCreateFailed,
    /// Database artifacts removed
    DatabaseDeleted,

    // Schema
    /// Schema could not be parsed
    SchemaCorrupt,

    // Records
    /// Record appended
    RecordAppended,
    /// Record updated in place
    RecordUpdated,
    /// Record removed
    RecordRemoved,
    /// Data file absent, treated as empty
    RecordsMissing,
    /// Data file unparseable, treated as empty
    RecordsCorrupt,
    /// Data file present but unreadable
    RecordsReadFailed,
    /// Record file rewrite failed
    RecordsSaveFailed,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ShellStart => "SHELL_START",
            Event::ShellExit => "SHELL_EXIT",
            Event::DatabaseCreated => "DATABASE_CREATED",
            Event::DatabaseCreateFailed => "DATABASE_CREATE_FAILED",
            Event::DatabaseDeleted => "DATABASE_DELETED",
            Event::SchemaCorrupt => "SCHEMA_CORRUPT",
            Event::RecordAppended => "RECORD_APPENDED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordRemoved => "RECORD_REMOVED",
            Event::RecordsMissing => "RECORDS_MISSING",
            Event::RecordsCorrupt => "RECORDS_CORRUPT",
            Event::RecordsReadFailed => "RECORDS_READ_FAILED",
            Event::RecordsSaveFailed => "RECORDS_SAVE_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> super::Severity {
        use super::Severity;
        match self {
            Event::SchemaCorrupt
            | Event::DatabaseCreateFailed
            | Event::RecordsReadFailed
            | Event::RecordsSaveFailed => Severity::Error,
            Event::RecordsMissing | Event::RecordsCorrupt => Severity::Warn,
            Event::ConfigLoaded | Event::ShellStart | Event::ShellExit => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::Severity;

    #[test]
    fn test_event_names_are_screaming_snake() {
        for event in [Event::DatabaseCreated, Event::RecordsCorrupt, Event::ShellExit] {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_recoverable_data_loss_is_warn() {
        assert_eq!(Event::RecordsCorrupt.severity(), Severity::Warn);
        assert_eq!(Event::RecordsMissing.severity(), Severity::Warn);
        assert_eq!(Event::SchemaCorrupt.severity(), Severity::Error);
        assert_eq!(Event::RecordsReadFailed.severity(), Severity::Error);
    }
}
