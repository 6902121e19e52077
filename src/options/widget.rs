use serde::Serialize;
use serde_json::{json, Value};

use crate::config::EditorConfig;
use crate::mapper::get_parameter_type;
use crate::metadata::Field;
use crate::model::{Parameter, TemplateTag};

/// Widget type of a field filter that has no widget chosen yet
pub const NO_WIDGET: &str = "none";

/// One entry of the "Filter widget type" dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetOption {
    pub widget_type: &'static str,
    pub name: &'static str,
}

const fn option(widget_type: &'static str, name: &'static str) -> WidgetOption {
    WidgetOption { widget_type, name }
}

const DATE_OPTIONS: &[WidgetOption] = &[
    option("date/month-year", "Month and Year"),
    option("date/quarter-year", "Quarter and Year"),
    option("date/single", "Single Date"),
    option("date/range", "Date Range"),
    option("date/relative", "Relative Date"),
    option("date/all-options", "All Options"),
];

const NUMBER_OPTIONS: &[WidgetOption] = &[
    option("number/=", "Equal to"),
    option("number/!=", "Not equal to"),
    option("number/between", "Between"),
    option("number/>=", "Greater than or equal to"),
    option("number/<=", "Less than or equal to"),
];

const STRING_OPTIONS: &[WidgetOption] = &[
    option("string/=", "Is"),
    option("string/!=", "Is not"),
    option("string/contains", "Contains"),
    option("string/does-not-contain", "Does not contain"),
    option("string/starts-with", "Starts with"),
    option("string/ends-with", "Ends with"),
];

const ID_OPTIONS: &[WidgetOption] = &[option("id", "ID")];

const BOOLEAN_OPTIONS: &[WidgetOption] = &[option("boolean/=", "Boolean")];

/// String widgets that match on part of a value
const PARTIAL_MATCH_WIDGETS: &[&str] = &[
    "string/contains",
    "string/does-not-contain",
    "string/starts-with",
    "string/ends-with",
];

/// Widgets that make sense for a field, in dropdown order
pub fn get_parameter_options_for_field(field: &Field) -> Vec<WidgetOption> {
    let options = if field.is_date() {
        DATE_OPTIONS
    } else if field.is_boolean() {
        BOOLEAN_OPTIONS
    } else if field.is_id() {
        ID_OPTIONS
    } else if field.is_numeric() {
        NUMBER_OPTIONS
    } else if field.is_string() || field.is_category() || field.is_location() {
        STRING_OPTIONS
    } else {
        &[]
    };
    options.to_vec()
}

/// Widget type a field filter gets when it is mapped to `field`
///
/// A widget the tag already has is kept if the field supports it.
pub fn get_default_parameter_widget_type(
    tag: &TemplateTag,
    field: &Field,
    config: &EditorConfig,
) -> String {
    let options = get_parameter_options_for_field(field);
    let Some(first) = options.first() else {
        return NO_WIDGET.to_string();
    };

    let supports = |widget_type: &str| options.iter().any(|o| o.widget_type == widget_type);

    if let Some(current) = tag.widget_type.as_deref() {
        if current != NO_WIDGET && supports(current) {
            return current.to_string();
        }
    }

    let many_values = field
        .distinct_count
        .is_some_and(|count| count > config.search_widget_distinct_count);
    if field.is_string() && many_values && supports("string/contains") {
        return "string/contains".to_string();
    }

    first.widget_type.to_string()
}

/// Widget options (`tag.options`) a tag starts with for its widget type
pub fn get_default_parameter_options(tag: &TemplateTag) -> Option<Value> {
    let parameter_type = get_parameter_type(tag);
    if PARTIAL_MATCH_WIDGETS.contains(&parameter_type.as_str()) {
        Some(json!({ "case-sensitive": false }))
    } else {
        None
    }
}

/// Whether the user may pick where the parameter's values come from
pub fn can_use_custom_source(parameter: &Parameter) -> bool {
    let exact = matches!(parameter.operator(), None | Some("=") | Some("!="));
    match parameter.base_type() {
        "string" | "category" | "location" => exact,
        "number" => matches!(parameter.operator(), Some("=") | Some("!=")),
        _ => false,
    }
}

/// Which fields the field picker offers for a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFilter {
    Any,
    DateOnly,
}

impl FieldFilter {
    pub fn accepts(&self, field: &Field) -> bool {
        match self {
            FieldFilter::Any => true,
            FieldFilter::DateOnly => field.is_date(),
        }
    }
}

/// Temporal-unit tags can only group by date columns
pub fn field_filter_for_tag(tag: &TemplateTag) -> FieldFilter {
    if tag.is_temporal_unit() {
        FieldFilter::DateOnly
    } else {
        FieldFilter::Any
    }
}
