//! CLI argument definitions using clap
//!
//! Commands:
//! - flatdb [shell]
//! - flatdb list
//! - flatdb show <name>
//! - flatdb create <name> --field NAME:LEN ...
//! - flatdb drop <name> [--yes]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flatdb - A minimal flat-file record store
#[derive(Parser, Debug)]
#[command(name = "flatdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: ./flatdb.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding database files; overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive menu (default)
    Shell,

    /// List databases
    List,

    /// Print the schema and records of a database
    Show {
        /// Database name
        name: String,
    },

    /// Create a database
    Create {
        /// Database name
        name: String,

        /// Field definition as NAME:MAX_LENGTH, repeatable
        #[arg(long = "field", value_parser = parse_field_spec, required = true)]
        fields: Vec<(String, i64)>,
    },

    /// Delete a database
    Drop {
        /// Database name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Subcommand to run; no subcommand means the interactive shell
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Shell)
    }
}

/// Parses `NAME:LEN`. The last ':' separates the length.
fn parse_field_spec(s: &str) -> Result<(String, i64), String> {
    let (name, len) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:MAX_LENGTH, got '{}'", s))?;
    let len = len
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid length '{}' for field '{}'", len, name))?;
    Ok((name.trim().to_string(), len))
}
