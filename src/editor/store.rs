use serde_json::Value;
use std::collections::HashMap;

use crate::mapper::{get_template_tag_parameter, get_template_tag_parameters_from_card};
use crate::model::{Card, DatasetQuery, FieldId, Parameter, ParameterValuesConfig, TemplateTag};

/// Where tag and parameter state lives
pub trait TagStore {
    /// Replace the tag with the same id
    fn set_template_tag(&mut self, tag: TemplateTag);
    /// Set (or clear) the value currently picked for the tag's parameter
    fn set_parameter_value(&mut self, tag_id: &str, value: Option<Value>);
    /// Store the values-source config for the tag's parameter
    fn set_template_tag_config(&mut self, tag: &TemplateTag, config: ParameterValuesConfig);
}

/// Loads full field metadata
///
/// Fire-and-forget: implementations may dispatch the request and return
/// immediately. A forced fetch reloads even cached fields.
pub trait FieldFetcher {
    fn fetch_field(&mut self, field_id: FieldId, force: bool);
}

/// In-memory store over one native card
///
/// Tags live in the card's query; values configs live in `card.parameters`
/// keyed by tag id; picked values are kept beside the card.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    pub card: Card,
    pub parameter_values: HashMap<String, Value>,
}

impl CardStore {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            parameter_values: HashMap::new(),
        }
    }

    pub fn template_tag(&self, name: &str) -> Option<&TemplateTag> {
        self.card.template_tag(name)
    }

    /// Parameters derived from the current tags, with their picked values
    pub fn parameters(&self) -> Vec<Parameter> {
        get_template_tag_parameters_from_card(&self.card)
            .into_iter()
            .map(|mut parameter| {
                parameter.value = self.parameter_values.get(&parameter.id).cloned();
                parameter
            })
            .collect()
    }

    pub fn parameter(&self, id: &str) -> Option<Parameter> {
        self.parameters().into_iter().find(|p| p.id == id)
    }
}

impl TagStore for CardStore {
    fn set_template_tag(&mut self, tag: TemplateTag) {
        let Some(DatasetQuery::Native { native, .. }) = &mut self.card.dataset_query else {
            tracing::debug!(tag = %tag.name, "card has no native query to hold the tag");
            return;
        };

        // a stored entry follows the tag's type and target, keeping its values config
        if let Some(stored) = self.card.parameters.iter_mut().flatten().find(|p| p.id == tag.id) {
            let config = stored.values_config();
            *stored = get_template_tag_parameter(&tag, Some(&config));
        }

        match native.template_tags.values().position(|t| t.id == tag.id) {
            Some(index) => native.template_tags[index] = tag,
            None => {
                native.template_tags.insert(tag.name.clone(), tag);
            }
        }
    }

    fn set_parameter_value(&mut self, tag_id: &str, value: Option<Value>) {
        match value {
            Some(value) if !value.is_null() => {
                self.parameter_values.insert(tag_id.to_string(), value);
            }
            _ => {
                self.parameter_values.remove(tag_id);
            }
        }
    }

    fn set_template_tag_config(&mut self, tag: &TemplateTag, config: ParameterValuesConfig) {
        let current = self
            .card
            .native_query()
            .and_then(|native| native.template_tags.values().find(|t| t.id == tag.id))
            .cloned()
            .unwrap_or_else(|| tag.clone());

        let has_entry = self
            .card
            .parameters
            .iter()
            .flatten()
            .any(|p| p.id == tag.id);
        if !has_entry {
            // Stored parameters replace the derived ones wholesale, so the
            // list has to cover every current tag, not just this one.
            let mut parameters = get_template_tag_parameters_from_card(&self.card);
            for stored in self.card.parameters.take().into_iter().flatten() {
                if !parameters.iter().any(|p| p.id == stored.id) {
                    parameters.push(stored);
                }
            }
            if !parameters.iter().any(|p| p.id == tag.id) {
                parameters.push(get_template_tag_parameter(&current, None));
            }
            self.card.parameters = Some(parameters);
        }

        let updated = get_template_tag_parameter(&current, Some(&config));
        if let Some(stored) = self.card.parameters.iter_mut().flatten().find(|p| p.id == tag.id) {
            *stored = updated;
        }
    }
}
