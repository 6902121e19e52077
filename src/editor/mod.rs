//! Template tag editor (verb module)
//!
//! One `TagEditor` per template tag. It reads the tag and its parameter from
//! props and writes every change through an injected `TagStore`; `view()`
//! derives which editor sections are visible.

mod controller;
mod store;
mod view;

pub use controller::{EmbeddingParameterVisibility, TagAttribute, TagEditor, TagEditorProps};
pub use store::{CardStore, FieldFetcher, TagStore};
pub use view::{
    filter_widget_type_value, DefaultRequiredView, FieldMappingView, TagEditorView,
    WidgetTypeSelectView,
};
