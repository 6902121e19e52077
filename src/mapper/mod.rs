//! Template tag → parameter mapper (verb module)
//!
//! - `parameter` - one tag (plus its stored values config) → one parameter
//! - `card` - a card's template tags and the parameters it exposes
//! - `remap` - dashboard filter values → template tag values

mod card;
mod parameter;
mod remap;

pub use card::{
    get_parameters_from_card, get_template_tag_parameters_from_card, get_template_tags,
    orphaned_card_parameters,
};
pub use parameter::{
    get_parameter_target, get_parameter_type, get_template_tag_parameter,
    get_template_tag_parameters,
};
pub use remap::{get_template_tag_from_target, remap_parameter_values_to_template_tags};
