//! Question filter header (verb module)
//!
//! Lists the filters of every stage of a structured query as labelled pills
//! and edits one filter at a time.

mod error;
mod header;

pub use error::FilterError;
pub use header::{filter_label, filter_pills, remove_filter, update_filter, FilterPill};
