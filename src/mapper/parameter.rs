use std::collections::HashMap;

use crate::model::{
    Parameter, ParameterTarget, ParameterValuesConfig, TargetReference, TemplateTag,
    TemplateTagKind,
};
use crate::options::NO_WIDGET;

/// Parameter type for a tag: a non-empty widget type wins, otherwise the tag type decides
pub fn get_parameter_type(tag: &TemplateTag) -> String {
    if let Some(widget_type) = tag.widget_type.as_deref().filter(|w| !w.is_empty()) {
        return widget_type.to_string();
    }

    let parameter_type = match &tag.kind {
        Some(TemplateTagKind::Date) => "date/single",
        Some(TemplateTagKind::Text) => "string/=",
        Some(TemplateTagKind::Number) => "number/=",
        Some(TemplateTagKind::Boolean) => "boolean/=",
        Some(TemplateTagKind::TemporalUnit { .. }) => "temporal-unit",
        Some(TemplateTagKind::Dimension { .. })
        | Some(TemplateTagKind::Card { .. })
        | Some(TemplateTagKind::Snippet { .. })
        | None => "category",
    };
    parameter_type.to_string()
}

/// Field filters and temporal-unit tags bind as dimensions, everything else as variables
pub fn get_parameter_target(tag: &TemplateTag) -> ParameterTarget {
    let reference = TargetReference::TemplateTag(tag.name.clone());
    match &tag.kind {
        Some(TemplateTagKind::Dimension { .. }) | Some(TemplateTagKind::TemporalUnit { .. }) => {
            ParameterTarget::Dimension(reference)
        }
        _ => ParameterTarget::Variable(reference),
    }
}

/// Build the parameter a tag exposes
///
/// `config` is the values-source configuration stored on the card for this
/// tag's id. `temporal_units` is only carried over for `temporal-unit`
/// parameters.
pub fn get_template_tag_parameter(
    tag: &TemplateTag,
    config: Option<&ParameterValuesConfig>,
) -> Parameter {
    let parameter_type = get_parameter_type(tag);
    let is_temporal_unit = parameter_type == "temporal-unit";

    Parameter {
        id: tag.id.clone(),
        target: Some(get_parameter_target(tag)),
        name: tag.display_name.clone(),
        slug: tag.name.clone(),
        default: tag.default.clone(),
        required: tag.required,
        options: tag.options.clone(),
        values_query_type: config.and_then(|c| c.values_query_type),
        values_source_type: config.and_then(|c| c.values_source_type),
        values_source_config: config.and_then(|c| c.values_source_config.clone()),
        temporal_units: if is_temporal_unit {
            config.and_then(|c| c.temporal_units.clone())
        } else {
            None
        },
        value: None,
        parameter_type,
    }
}

/// Whether a tag surfaces as a user-facing parameter
///
/// Card and snippet tags compose queries rather than filter them, and a field
/// filter with neither a mapped field nor a widget is still incomplete.
fn is_parameter_tag(tag: &TemplateTag) -> bool {
    let has_widget = tag
        .widget_type
        .as_deref()
        .is_some_and(|widget_type| !widget_type.is_empty() && widget_type != NO_WIDGET);

    match &tag.kind {
        None => false,
        Some(TemplateTagKind::Card { .. }) | Some(TemplateTagKind::Snippet { .. }) => false,
        Some(TemplateTagKind::Dimension { dimension })
        | Some(TemplateTagKind::TemporalUnit { dimension }) => dimension.is_some() || has_widget,
        Some(_) => true,
    }
}

/// Parameters for a list of tags, in tag order
///
/// `parameters` holds the card's stored parameters; each tag picks up the
/// values config of the parameter sharing its id.
// Mirrors the server-side `template-tag-parameters` derivation; the two must
// agree on which tags become parameters.
pub fn get_template_tag_parameters<'a, I>(tags: I, parameters: &[Parameter]) -> Vec<Parameter>
where
    I: IntoIterator<Item = &'a TemplateTag>,
{
    let configs: HashMap<&str, ParameterValuesConfig> = parameters
        .iter()
        .map(|p| (p.id.as_str(), p.values_config()))
        .collect();

    tags.into_iter()
        .filter(|tag| is_parameter_tag(tag))
        .map(|tag| get_template_tag_parameter(tag, configs.get(tag.id.as_str())))
        .collect()
}
