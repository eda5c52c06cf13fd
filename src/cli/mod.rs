//! CLI module for flatdb
//!
//! Provides the command-line interface:
//! - shell: interactive menu (default)
//! - list / show: read-only inspection
//! - create / drop: one-shot lifecycle commands

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod shell;

pub use args::{Cli, Command};
pub use commands::{create, drop_database, list, run, run_command, show};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::Prompter;
pub use shell::Shell;
