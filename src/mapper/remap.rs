use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::model::{Parameter, ParameterTarget, TemplateTag};

/// Name of the template tag a parameter target points at
pub fn get_template_tag_from_target(target: Option<&ParameterTarget>) -> Option<&str> {
    target?.template_tag_name()
}

/// Carry dashboard filter values over to a saved native question
///
/// Each dashboard parameter that targets one of `template_tags` copies its
/// value (looked up by dashboard parameter id, possibly absent) under the
/// tag's name, in dashboard parameter order. Parameters whose target names
/// no known tag are skipped.
pub fn remap_parameter_values_to_template_tags(
    template_tags: &[TemplateTag],
    dashboard_parameters: &[Parameter],
    values_by_dashboard_parameter_id: &HashMap<String, Value>,
) -> IndexMap<String, Option<Value>> {
    let tag_names: HashSet<&str> = template_tags.iter().map(|t| t.name.as_str()).collect();
    let mut values = IndexMap::new();

    for parameter in dashboard_parameters {
        let Some(name) = get_template_tag_from_target(parameter.target.as_ref()) else {
            tracing::debug!(parameter_id = %parameter.id, "dashboard parameter does not target a template tag");
            continue;
        };
        if !tag_names.contains(name) {
            tracing::debug!(parameter_id = %parameter.id, tag = name, "no template tag with this name");
            continue;
        }

        let value = values_by_dashboard_parameter_id.get(&parameter.id).cloned();
        values.insert(name.to_string(), value);
    }

    values
}
