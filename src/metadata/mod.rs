//! Database metadata: databases, tables and fields
//!
//! Only what the tag editor needs to look fields up by id and decide which
//! filter widgets suit them.

mod field;
mod store;

pub use field::{Database, Field, Table};
pub use store::Metadata;
