//! Filter parameters and their value-source configuration

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::template_tag::FieldReference;

/// What a parameter reference points at inside a target
#[derive(Debug, Clone, PartialEq)]
pub enum TargetReference {
    /// `["template-tag", name]`
    TemplateTag(String),
    /// `["field", id, options]`
    Field(FieldReference),
    /// Any other clause, kept as-is
    Other(Value),
}

impl TargetReference {
    pub fn to_value(&self) -> Value {
        match self {
            TargetReference::TemplateTag(name) => {
                Value::Array(vec![Value::from("template-tag"), Value::from(name.as_str())])
            }
            TargetReference::Field(field) => field.to_value(),
            TargetReference::Other(value) => value.clone(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let head = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_str);

        match head {
            Some("template-tag") => match value.get(1).and_then(Value::as_str) {
                Some(name) => TargetReference::TemplateTag(name.to_string()),
                None => TargetReference::Other(value.clone()),
            },
            Some("field") => FieldReference::from_value(value)
                .map(TargetReference::Field)
                .unwrap_or_else(|_| TargetReference::Other(value.clone())),
            _ => TargetReference::Other(value.clone()),
        }
    }
}

/// Where a parameter's value is applied
///
/// A template-tag parameter binds either as a `dimension` (field filters and
/// temporal-unit tags) or as a `variable` (plain value substitution).
/// Dashboard parameters can also target text cards with `text-tag`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterTarget {
    Dimension(TargetReference),
    Variable(TargetReference),
    TextTag(String),
}

impl ParameterTarget {
    /// Name of the template tag this target references, if any
    pub fn template_tag_name(&self) -> Option<&str> {
        match self {
            ParameterTarget::Dimension(TargetReference::TemplateTag(name))
            | ParameterTarget::Variable(TargetReference::TemplateTag(name)) => Some(name),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ParameterTarget::Dimension(reference) => {
                Value::Array(vec![Value::from("dimension"), reference.to_value()])
            }
            ParameterTarget::Variable(reference) => {
                Value::Array(vec![Value::from("variable"), reference.to_value()])
            }
            ParameterTarget::TextTag(tag) => {
                Value::Array(vec![Value::from("text-tag"), Value::from(tag.as_str())])
            }
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, String> {
        let items = value
            .as_array()
            .ok_or_else(|| format!("expected a parameter target array, got {}", value))?;
        let kind = items.first().and_then(Value::as_str);
        let second = items
            .get(1)
            .ok_or_else(|| format!("parameter target is missing its reference: {}", value))?;

        match kind {
            Some("dimension") => Ok(ParameterTarget::Dimension(TargetReference::from_value(second))),
            Some("variable") => Ok(ParameterTarget::Variable(TargetReference::from_value(second))),
            Some("text-tag") => second
                .as_str()
                .map(|tag| ParameterTarget::TextTag(tag.to_string()))
                .ok_or_else(|| format!("text-tag target needs a tag name: {}", value)),
            _ => Err(format!("unknown parameter target kind in {}", value)),
        }
    }
}

impl Serialize for ParameterTarget {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ParameterTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ParameterTarget::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Value source configuration
// ============================================================================

/// How the filter widget offers values to pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuesQueryType {
    /// Dropdown list
    List,
    /// Search box
    Search,
    /// Plain input box
    None,
}

/// Where a parameter's selectable values come from (absent = the field's own values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuesSourceType {
    Card,
    StaticList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuesSourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_field: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemporalUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    MinuteOfHour,
    HourOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    WeekOfYear,
    MonthOfYear,
    QuarterOfYear,
}

impl TemporalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalUnit::Minute => "minute",
            TemporalUnit::Hour => "hour",
            TemporalUnit::Day => "day",
            TemporalUnit::Week => "week",
            TemporalUnit::Month => "month",
            TemporalUnit::Quarter => "quarter",
            TemporalUnit::Year => "year",
            TemporalUnit::MinuteOfHour => "minute-of-hour",
            TemporalUnit::HourOfDay => "hour-of-day",
            TemporalUnit::DayOfWeek => "day-of-week",
            TemporalUnit::DayOfMonth => "day-of-month",
            TemporalUnit::DayOfYear => "day-of-year",
            TemporalUnit::WeekOfYear => "week-of-year",
            TemporalUnit::MonthOfYear => "month-of-year",
            TemporalUnit::QuarterOfYear => "quarter-of-year",
        }
    }
}

/// The "how do users pick a value" settings attached to a tag
///
/// Stored on the card's `parameters` entry with the same id as the tag,
/// not on the tag itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterValuesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_query_type: Option<ValuesQueryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_source_type: Option<ValuesSourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_source_config: Option<ValuesSourceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_units: Option<Vec<TemporalUnit>>,
}

impl ParameterValuesConfig {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ============================================================================
// Parameter
// ============================================================================

/// A filter parameter, as shown by filter widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    /// Dotted type/operator string, e.g. `string/=` or `date/single`
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ParameterTarget>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_query_type: Option<ValuesQueryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_source_type: Option<ValuesSourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_source_config: Option<ValuesSourceConfig>,
    /// Only ever set on `temporal-unit` parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_units: Option<Vec<TemporalUnit>>,
    /// Value currently picked in the widget; never persisted with the card
    #[serde(default, skip_serializing)]
    pub value: Option<Value>,
}

impl Parameter {
    pub fn new(id: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameter_type: parameter_type.into(),
            target: None,
            name: String::new(),
            slug: String::new(),
            default: None,
            required: None,
            options: None,
            values_query_type: None,
            values_source_type: None,
            values_source_config: None,
            temporal_units: None,
            value: None,
        }
    }

    pub fn with_target(mut self, target: ParameterTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// `string` for `string/=`, `category` for `category`
    pub fn base_type(&self) -> &str {
        self.parameter_type
            .split_once('/')
            .map(|(base, _)| base)
            .unwrap_or(&self.parameter_type)
    }

    /// `=` for `string/=`, `None` for `category`
    pub fn operator(&self) -> Option<&str> {
        self.parameter_type.split_once('/').map(|(_, op)| op)
    }

    pub fn values_config(&self) -> ParameterValuesConfig {
        ParameterValuesConfig {
            values_query_type: self.values_query_type,
            values_source_type: self.values_source_type,
            values_source_config: self.values_source_config.clone(),
            temporal_units: self.temporal_units.clone(),
        }
    }
}
