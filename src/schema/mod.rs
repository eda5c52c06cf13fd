//! Schema subsystem for flatdb
//!
//! A schema maps each field name to a maximum length. It is written once
//! when the database is created and never changes afterwards.
//!
//! - Field order is the definition order
//! - Lengths are positive and counted in characters
//! - Validation happens at write time, never on read

mod store;
mod types;
mod validator;

pub use store::SchemaStore;
pub use types::{FieldDef, Schema, SchemaBuilder};
pub use validator::SchemaValidator;
