//! flatdb - A minimal flat-file record store
//!
//! A database is a named pair of files in the data directory:
//! - `<name>_system.json`: field name → maximum length
//! - `<name>_data.json`: array of records, field name → value
//!
//! ```ignore
//! use flatdb::backend::LocalBackend;
//! use flatdb::database::{Catalog, DatabaseName};
//! use flatdb::records::Record;
//! use flatdb::schema::Schema;
//!
//! let catalog = Catalog::new(LocalBackend::new("."));
//! let name = DatabaseName::parse("contacts")?;
//! catalog.create_database(&name, &Schema::new([("name", 20), ("phone", 15)])?)?;
//!
//! let db = catalog.open(&name)?;
//! db.add_record(&Record::from_pairs([("name", "Ann"), ("phone", "555-0001")]))?;
//! println!("{}", db.render()?);
//! ```

pub mod backend;
pub mod cli;
pub mod codec;
pub mod database;
pub mod errors;
pub mod observability;
pub mod records;
pub mod schema;

pub use errors::{FlatDbError, FlatDbResult, ValidationDetails};
