//! nativeparams - Turn native-query template tags into filter parameters
//!
//! This library provides:
//! - Card, template tag and parameter types with their wire format
//! - Template tag → parameter mapping
//! - Remapping of dashboard filter values onto template tags
//! - Filter widget policy for mapped fields
//! - The template tag editor (controller + view)
//! - The question filter header for multi-stage queries
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `model/` - Card, TemplateTag, Parameter, Series
//! - `metadata/` - Database, Table, Field
//! - `query/` - StructuredQuery, QueryStage, FilterClause
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → Card / Metadata / Parameters
//! - `mapper/` - TemplateTag → Parameter, values → tag values
//! - `options/` - Field → widget options
//! - `editor/` - TemplateTag + user action → TagStore updates
//! - `filters/` - StructuredQuery → filter pills, filter edits
//!
//! # Example
//!
//! ```ignore
//! use nativeparams::{parser, get_parameters_from_card, remap_parameter_values_to_template_tags};
//!
//! let card = parser::parse_card_file("card.yaml")?;
//! let parameters = get_parameters_from_card(&card);
//! let tags: Vec<_> = card.native_query().unwrap().template_tags.values().cloned().collect();
//! let values = remap_parameter_values_to_template_tags(&tags, &dashboard_parameters, &values);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod filters;
pub mod mapper;
pub mod metadata;
pub mod model;
pub mod options;
pub mod parser;
pub mod query;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editor::{CardStore, FieldFetcher, TagEditor, TagEditorProps, TagEditorView, TagStore};
pub use error::ParseError;
pub use filters::{filter_pills, remove_filter, update_filter, FilterError, FilterPill};
pub use mapper::{
    get_parameter_target, get_parameter_type, get_parameters_from_card, get_template_tag_parameter,
    get_template_tag_parameters, get_template_tags, remap_parameter_values_to_template_tags,
};
pub use metadata::{Database, Field, Metadata, Table};
pub use model::{
    Card, Parameter, ParameterTarget, ParameterValuesConfig, TemplateTag, TemplateTagKind,
    TemplateTagType,
};
pub use query::{FilterClause, FilterOperator, StructuredQuery};
