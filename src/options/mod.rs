//! Filter widget policy (verb module)
//!
//! Decides which widgets a field can use, which one a newly mapped field
//! filter starts with, and which widget options a tag carries.

mod widget;

pub use widget::{
    can_use_custom_source, field_filter_for_tag, get_default_parameter_options,
    get_default_parameter_widget_type, get_parameter_options_for_field, FieldFilter,
    WidgetOption, NO_WIDGET,
};
