use crate::model::{Card, Parameter, TemplateTag};

use super::parameter::get_template_tag_parameters;

/// Template tags of a card's native query, in stored order
///
/// Empty for cards that don't run a native query.
pub fn get_template_tags(card: &Card) -> Vec<&TemplateTag> {
    card.native_query()
        .map(|native| native.template_tags.values().collect())
        .unwrap_or_default()
}

/// Parameters derived from the card's template tags
///
/// The card's stored parameters only contribute their values config.
pub fn get_template_tag_parameters_from_card(card: &Card) -> Vec<Parameter> {
    let stored = card.parameters.as_deref().unwrap_or(&[]);
    get_template_tag_parameters(get_template_tags(card), stored)
}

/// Parameters a card exposes
///
/// Explicit `card.parameters` win wholesale when present, without being
/// reconciled against the current template tags; otherwise the parameters
/// are derived from the tags.
pub fn get_parameters_from_card(card: &Card) -> Vec<Parameter> {
    match card.parameters.as_deref() {
        Some(parameters) if !parameters.is_empty() => {
            let orphaned = orphaned_card_parameters(card);
            if !orphaned.is_empty() {
                tracing::warn!(
                    card_id = ?card.id,
                    parameters = ?orphaned.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
                    "card parameters reference template tags missing from the query"
                );
            }
            parameters.to_vec()
        }
        _ => get_template_tag_parameters_from_card(card),
    }
}

/// Stored parameters of a native card whose template-tag target names a tag the query no longer has
pub fn orphaned_card_parameters(card: &Card) -> Vec<&Parameter> {
    let Some(native) = card.native_query() else {
        return vec![];
    };

    card.parameters
        .iter()
        .flatten()
        .filter(|parameter| {
            parameter
                .target
                .as_ref()
                .and_then(|target| target.template_tag_name())
                .is_some_and(|name| !native.template_tags.contains_key(name))
        })
        .collect()
}
