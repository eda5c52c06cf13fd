//! CLI-specific error types

use std::fmt;
use std::io;

use crate::errors::FlatDbError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Input stream ended
    InputClosed,
    /// Storage operation failed
    StoreError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FLATDB_CLI_CONFIG_ERROR",
            Self::IoError => "FLATDB_CLI_IO_ERROR",
            Self::InputClosed => "FLATDB_CLI_INPUT_CLOSED",
            Self::StoreError => "FLATDB_CLI_STORE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn input_closed() -> Self {
        Self::new(CliErrorCode::InputClosed, "Input stream closed")
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_input_closed(&self) -> bool {
        self.code == CliErrorCode::InputClosed
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<FlatDbError> for CliError {
    fn from(e: FlatDbError) -> Self {
        Self::new(CliErrorCode::StoreError, format!("[{}] {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_keeps_code() {
        let err: CliError = FlatDbError::NotFound("database 'x'".into()).into();
        assert_eq!(err.code_str(), "FLATDB_CLI_STORE_ERROR");
        assert!(err.message().contains("FLATDB_NOT_FOUND"));
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("bad indent");
        assert_eq!(err.to_string(), "FLATDB_CLI_CONFIG_ERROR: bad indent");
    }
}
