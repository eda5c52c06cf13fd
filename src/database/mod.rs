//! Database lifecycle
//!
//! A database is the pairing of one schema artifact and one data artifact
//! that share a validated name.

mod catalog;
mod handle;
mod name;

pub use catalog::{Catalog, DeleteReport};
pub use handle::Database;
pub use name::{DatabaseName, DATA_SUFFIX, MAX_NAME_LENGTH, SCHEMA_SUFFIX};
