//! Structured (multi-stage) query types
//!
//! A structured query is an ordered list of stages; each stage filters the
//! rows produced by the previous one.

mod filter;

pub use filter::{ColumnRef, FilterClause, FilterOperator, QueryStage, StructuredQuery};
