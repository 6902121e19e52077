use serde::Serialize;
use serde_json::Value;

use super::controller::{EmbeddingParameterVisibility, TagEditor};
use super::store::TagStore;
use crate::model::{FieldId, TemplateTag, TemplateTagType};
use crate::options::{
    can_use_custom_source, field_filter_for_tag, get_parameter_options_for_field, FieldFilter,
    WidgetOption, NO_WIDGET,
};

/// Which parts of the tag editor are shown, and with what
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagEditorView {
    pub variable_name: String,
    pub tag_type: Option<TemplateTagType>,
    pub field_mapping: Option<FieldMappingView>,
    pub widget_type_select: Option<WidgetTypeSelectView>,
    /// Current label when the label input is shown
    pub label_input: Option<String>,
    pub temporal_unit_settings: bool,
    pub values_source_settings: bool,
    pub default_required: Option<DefaultRequiredView>,
}

/// "Field to map to"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMappingView {
    /// "(required)" marker while no field is mapped
    pub required_marker: bool,
    /// Hidden while a mapped field's metadata is still loading
    pub show_selector: bool,
    pub initially_open: bool,
    pub selected_database_id: Option<i64>,
    pub selected_table_id: Option<i64>,
    pub selected_field_id: Option<FieldId>,
    #[serde(skip)]
    pub field_filter: FieldFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetTypeSelectView {
    pub value: String,
    pub options: Vec<WidgetOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultRequiredView {
    pub default: Option<Value>,
    pub required: bool,
    pub embedded_disabled: bool,
}

/// Widget type the dropdown shows for a tag
///
/// Old `location/*` and `category` widgets display as `string/=`; the stored
/// tag is left alone.
pub fn filter_widget_type_value(tag: &TemplateTag) -> String {
    let widget_type = tag.widget_type.as_deref().unwrap_or(NO_WIDGET);
    if widget_type.starts_with("location") || widget_type == "category" {
        return "string/=".to_string();
    }
    widget_type.to_string()
}

impl<'a, S: TagStore> TagEditor<'a, S> {
    pub fn view(&self) -> TagEditorView {
        let props = &self.props;
        let tag = props.tag;
        let is_dimension = tag.is_dimension();
        let is_temporal_unit = tag.is_temporal_unit();
        let has_selected_field = tag.is_field_filter() && tag.dimension().is_some();

        let field = tag.field_id().and_then(|id| props.metadata.field(id));
        let widget_options = field.map(get_parameter_options_for_field).unwrap_or_default();
        let table = field.and_then(|f| props.metadata.field_table(f));

        let field_mapping = tag.is_field_filter().then(|| FieldMappingView {
            required_marker: tag.dimension().is_none(),
            show_selector: !has_selected_field || field.is_some(),
            initially_open: tag.dimension().is_none(),
            selected_database_id: props.database.map(|d| d.id),
            selected_table_id: table.map(|t| t.id),
            selected_field_id: if has_selected_field { tag.field_id() } else { None },
            field_filter: field_filter_for_tag(tag),
        });

        let widget_type_select = (is_dimension && has_selected_field).then(|| WidgetTypeSelectView {
            value: filter_widget_type_value(tag),
            options: widget_options.clone(),
        });

        let label_input =
            (!is_dimension || !widget_options.is_empty()).then(|| tag.display_name.clone());

        let parameter = props.parameter;
        let embedded_disabled =
            props.embedded_parameter_visibility == Some(EmbeddingParameterVisibility::Disabled);

        TagEditorView {
            variable_name: tag.name.clone(),
            tag_type: tag.tag_type(),
            field_mapping,
            widget_type_select,
            label_input,
            temporal_unit_settings: parameter.is_some() && is_temporal_unit,
            values_source_settings: parameter.is_some_and(can_use_custom_source),
            default_required: parameter.map(|_| DefaultRequiredView {
                default: tag.default.clone(),
                required: tag.required.unwrap_or(false),
                embedded_disabled,
            }),
        }
    }
}
