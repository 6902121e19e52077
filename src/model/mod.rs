//! Domain types (nouns)
//!
//! Template tags, the parameters derived from them, and the cards they live in.

mod card;
mod parameter;
mod series;
mod template_tag;

pub use card::{Card, DatasetQuery, NativeQuery};
pub use parameter::{
    Parameter, ParameterTarget, ParameterValuesConfig, TargetReference, TemporalUnit,
    ValuesQueryType, ValuesSourceConfig, ValuesSourceType,
};
pub use series::{Dataset, ResultColumn, Series, SingleSeries};
pub use template_tag::{
    FieldId, FieldReference, ParseTemplateTagTypeError, TemplateTag, TemplateTagKind,
    TemplateTagType,
};
