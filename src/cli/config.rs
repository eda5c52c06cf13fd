//! Configuration file
//!
//! Optional JSON file, `./flatdb.json` by default:
//!
//! ```json
//! { "data_dir": ".", "json_indent": 4, "log_level": "WARN" }
//! ```
//!
//! Every field has a default. A missing default file means defaults; a
//! missing file named explicitly is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::DEFAULT_INDENT;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./flatdb.json";

/// Widest accepted indentation
pub const MAX_INDENT: usize = 8;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding database files (default: working directory)
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Indentation of written JSON files (default: 4)
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,

    /// Lowest logged severity (default: WARN)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}
fn default_json_indent() -> usize {
    DEFAULT_INDENT
}
fn default_log_level() -> String {
    Severity::Warn.as_str().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            json_indent: default_json_indent(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolves the config to use: an explicit path must exist, the
    /// default path is optional.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.json_indent > MAX_INDENT {
            return Err(CliError::config_error(format!(
                "json_indent must be at most {}, got {}",
                MAX_INDENT, self.json_indent
            )));
        }

        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of TRACE, INFO, WARN, ERROR, FATAL.",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Replaces the data directory when `--data-dir` was given
    pub fn with_data_dir(mut self, data_dir: Option<&Path>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir.display().to_string();
        }
        self
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Parsed log level; validated on load
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Warn)
    }
}
