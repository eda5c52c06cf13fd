//! Record subsystem for flatdb
//!
//! Records are kept as a JSON array in `<name>_data.json`. A record has
//! no key of its own; it is addressed by its zero-based position.

mod store;
mod table;
mod types;

pub use store::RecordStore;
pub use table::render_table;
pub use types::Record;
