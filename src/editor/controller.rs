use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::{FieldFetcher, TagStore};
use crate::config::EditorConfig;
use crate::mapper::get_parameters_from_card;
use crate::metadata::{Database, Metadata};
use crate::model::{
    Card, FieldId, FieldReference, Parameter, ParameterValuesConfig, TemplateTag,
    TemplateTagKind, TemplateTagType, TemporalUnit, ValuesQueryType, ValuesSourceConfig,
    ValuesSourceType,
};
use crate::options::{get_default_parameter_options, get_default_parameter_widget_type, NO_WIDGET};

/// How a parameter behaves when the question is embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingParameterVisibility {
    Disabled,
    Enabled,
    Locked,
}

/// Tag attributes the generic setter can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAttribute {
    DisplayName,
    Default,
}

/// Everything the editor reads; owned elsewhere
#[derive(Debug, Clone, Copy)]
pub struct TagEditorProps<'a> {
    pub tag: &'a TemplateTag,
    /// `None` while a field filter is incomplete (no field or widget yet)
    pub parameter: Option<&'a Parameter>,
    pub metadata: &'a Metadata,
    /// The question as last saved
    pub original_card: Option<&'a Card>,
    pub database: Option<&'a Database>,
    pub databases: &'a [Database],
    pub embedded_parameter_visibility: Option<EmbeddingParameterVisibility>,
    pub config: &'a EditorConfig,
}

impl<'a> TagEditorProps<'a> {
    pub fn new(tag: &'a TemplateTag, metadata: &'a Metadata, config: &'a EditorConfig) -> Self {
        Self {
            tag,
            parameter: None,
            metadata,
            original_card: None,
            database: None,
            databases: &[],
            embedded_parameter_visibility: None,
            config,
        }
    }
}

/// Editor for one template tag
pub struct TagEditor<'a, S: TagStore> {
    pub(super) props: TagEditorProps<'a>,
    store: &'a mut S,
}

/// No value picked: absent, null, empty text or empty list
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn normalize_attribute_value(value: Option<Value>) -> Option<Value> {
    if is_blank(value.as_ref()) {
        None
    } else {
        value
    }
}

impl<'a, S: TagStore> TagEditor<'a, S> {
    pub fn new(props: TagEditorProps<'a>, store: &'a mut S) -> Self {
        Self { props, store }
    }

    pub fn tag(&self) -> &'a TemplateTag {
        self.props.tag
    }

    /// Load the mapped field's full metadata
    ///
    /// List and search views may only have loaded part of the field, so the
    /// fetch is forced unless the config turns that off.
    pub fn mount<F: FieldFetcher>(&self, fetcher: &mut F) {
        let tag = self.props.tag;
        if !tag.is_dimension() {
            return;
        }
        if let Some(field_id) = tag.field_id() {
            tracing::debug!(tag = %tag.name, field_id, "loading mapped field");
            fetcher.fetch_field(field_id, self.props.config.force_field_reload);
        }
    }

    /// Values config to keep after switching the tag to `new_type`
    ///
    /// The previous source settings come back only if the saved question
    /// still has a tag of this name with `new_type` and a parameter with
    /// this parameter's id.
    fn config_after_type_change(&self, new_type: TemplateTagType) -> ParameterValuesConfig {
        let (Some(parameter), Some(original)) = (self.props.parameter, self.props.original_card) else {
            return ParameterValuesConfig::default();
        };
        if !original.is_native() {
            return ParameterValuesConfig::default();
        }

        let original_tag = original.template_tag(&self.props.tag.name);
        if original_tag.and_then(TemplateTag::tag_type) != Some(new_type) {
            return ParameterValuesConfig::default();
        }

        let original_parameters = get_parameters_from_card(original);
        let Some(original_parameter) = original_parameters.iter().find(|p| p.id == parameter.id) else {
            return ParameterValuesConfig::default();
        };

        ParameterValuesConfig {
            values_query_type: original_parameter.values_query_type,
            values_source_type: original_parameter.values_source_type,
            values_source_config: original_parameter.values_source_config.clone(),
            temporal_units: None,
        }
    }

    /// Variable type select
    pub fn set_type(&mut self, new_type: TemplateTagType) {
        let tag = self.props.tag;
        if tag.tag_type() == Some(new_type) {
            return;
        }

        let mut updated = tag.clone();
        updated.kind = Some(TemplateTagKind::empty(new_type));
        updated.default = None;
        updated.widget_type = match new_type {
            TemplateTagType::Dimension => Some(NO_WIDGET.to_string()),
            _ => None,
        };

        self.store.set_template_tag(updated);
        self.store.set_parameter_value(&tag.id, None);
        let config = self.config_after_type_change(new_type);
        self.store.set_template_tag_config(tag, config);
    }

    /// Filter widget type select
    pub fn set_widget_type(&mut self, widget_type: &str) {
        let tag = self.props.tag;
        if tag.widget_type.as_deref() == Some(widget_type) {
            return;
        }

        let mut updated = tag.clone();
        updated.widget_type = Some(widget_type.to_string());
        // the old default rarely fits the new widget (date/relative -> date/single)
        updated.default = None;
        updated.options = get_default_parameter_options(&updated);

        self.store.set_template_tag(updated);
        self.store.set_parameter_value(&tag.id, None);
    }

    pub fn set_required(&mut self, required: bool) {
        let tag = self.props.tag;
        if tag.required != Some(required) {
            let mut updated = tag.clone();
            updated.required = Some(required);
            self.store.set_template_tag(updated);
        }

        let Some(parameter) = self.props.parameter else {
            // the required toggle is only shown when a parameter exists
            tracing::debug!(tag = %tag.name, "required changed without a parameter");
            return;
        };

        if required && is_blank(parameter.value.as_ref()) && !is_blank(tag.default.as_ref()) {
            self.store.set_parameter_value(&tag.id, tag.default.clone());
        }
    }

    fn current_values_config(&self) -> ParameterValuesConfig {
        self.props
            .parameter
            .map(Parameter::values_config)
            .unwrap_or_default()
    }

    pub fn set_query_type(&mut self, query_type: ValuesQueryType) {
        let mut config = self.current_values_config();
        if config.values_query_type == Some(query_type) {
            return;
        }
        config.values_query_type = Some(query_type);
        self.store.set_template_tag_config(self.props.tag, config);
    }

    /// `source_type` of `None` means the field's own values
    pub fn set_source_settings(
        &mut self,
        source_type: Option<ValuesSourceType>,
        source_config: ValuesSourceConfig,
    ) {
        let mut config = self.current_values_config();
        if config.values_source_type == source_type
            && config.values_source_config.as_ref() == Some(&source_config)
        {
            return;
        }
        config.values_source_type = source_type;
        config.values_source_config = Some(source_config);
        self.store.set_template_tag_config(self.props.tag, config);
    }

    /// Field to map to
    pub fn set_dimension(&mut self, field_id: FieldId) {
        let tag = self.props.tag;
        let dimension = FieldReference::new(field_id);
        if tag.dimension() == Some(&dimension) {
            return;
        }

        let Some(field) = self.props.metadata.field(field_id) else {
            tracing::debug!(tag = %tag.name, field_id, "mapped field is not loaded");
            return;
        };

        let mut updated = tag.clone();
        match &mut updated.kind {
            Some(TemplateTagKind::Dimension { dimension: mapped }) => {
                *mapped = Some(dimension);
                updated.widget_type = Some(get_default_parameter_widget_type(tag, field, self.props.config));
            }
            Some(TemplateTagKind::TemporalUnit { dimension: mapped }) => {
                *mapped = Some(dimension);
            }
            _ => {
                tracing::debug!(tag = %tag.name, "only field filters can be mapped to a field");
                return;
            }
        }
        updated.options = get_default_parameter_options(&updated);

        self.store.set_template_tag(updated);
    }

    /// Write one tag attribute; empty text, empty lists and null are stored as absent
    pub fn set_parameter_attribute(&mut self, attribute: TagAttribute, value: Option<Value>) {
        let tag = self.props.tag;
        let current = match attribute {
            TagAttribute::DisplayName => Some(Value::String(tag.display_name.clone())),
            TagAttribute::Default => tag.default.clone(),
        };
        if current == value {
            return;
        }

        let value = normalize_attribute_value(value);
        let mut updated = tag.clone();
        match attribute {
            TagAttribute::DisplayName => {
                updated.display_name = value
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_default();
            }
            TagAttribute::Default => updated.default = value,
        }
        self.store.set_template_tag(updated);
    }

    /// Default value control: stored on the tag and picked right away
    pub fn set_default_value(&mut self, value: Option<Value>) {
        self.set_parameter_attribute(TagAttribute::Default, value.clone());
        self.store.set_parameter_value(&self.props.tag.id, value);
    }

    /// Time grouping options of a temporal-unit tag
    ///
    /// A default outside the new units is cleared along with the picked value.
    pub fn set_temporal_units(&mut self, temporal_units: Vec<TemporalUnit>) {
        let tag = self.props.tag;
        if self.current_values_config().temporal_units.as_ref() == Some(&temporal_units) {
            return;
        }
        // the units are the whole config of a temporal-unit parameter
        let config = ParameterValuesConfig {
            temporal_units: Some(temporal_units.clone()),
            ..Default::default()
        };
        self.store.set_template_tag_config(tag, config);

        let Some(default) = tag.default.as_ref().filter(|d| !d.is_null()) else {
            return;
        };
        let default_unit = serde_json::from_value::<TemporalUnit>(default.clone()).ok();
        let still_available = default_unit.is_some_and(|unit| temporal_units.contains(&unit));
        if !still_available {
            self.set_parameter_attribute(TagAttribute::Default, None);
            self.store.set_parameter_value(&tag.id, None);
        }
    }
}
