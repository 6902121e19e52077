//! Template tags parsed out of a native query body

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Metadata id of a database column
pub type FieldId = i64;

/// Reference to a database column: `["field", id, options]`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReference {
    pub field_id: FieldId,
    pub options: Option<Value>,
}

impl FieldReference {
    /// A bare reference with no options (`["field", id, null]`)
    pub fn new(field_id: FieldId) -> Self {
        Self { field_id, options: None }
    }

    pub fn to_value(&self) -> Value {
        Value::Array(vec![
            Value::from("field"),
            Value::from(self.field_id),
            self.options.clone().unwrap_or(Value::Null),
        ])
    }

    /// Read a field reference out of its array shape
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let items = value
            .as_array()
            .ok_or_else(|| format!("expected a field reference array, got {}", value))?;

        match items.first().and_then(Value::as_str) {
            Some("field") => {}
            _ => return Err(format!("expected [\"field\", id, options], got {}", value)),
        }

        let field_id = items
            .get(1)
            .and_then(Value::as_i64)
            .ok_or_else(|| format!("field reference needs an integer id, got {}", value))?;

        let options = match items.get(2) {
            None | Some(Value::Null) => None,
            Some(other) => Some(other.clone()),
        };

        Ok(Self { field_id, options })
    }
}

impl Serialize for FieldReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        FieldReference::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TemplateTagType
// ============================================================================

/// The `type` attribute of a template tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateTagType {
    Text,
    Number,
    Date,
    Boolean,
    /// Field filter: the tag is bound to a database column
    Dimension,
    TemporalUnit,
    /// Reference to another saved question
    Card,
    Snippet,
}

impl TemplateTagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateTagType::Text => "text",
            TemplateTagType::Number => "number",
            TemplateTagType::Date => "date",
            TemplateTagType::Boolean => "boolean",
            TemplateTagType::Dimension => "dimension",
            TemplateTagType::TemporalUnit => "temporal-unit",
            TemplateTagType::Card => "card",
            TemplateTagType::Snippet => "snippet",
        }
    }
}

impl fmt::Display for TemplateTagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a template tag type string
#[derive(Debug, Clone)]
pub struct ParseTemplateTagTypeError {
    pub input: String,
}

impl fmt::Display for ParseTemplateTagTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown template tag type '{}'. Valid options: text, number, date, boolean, dimension, temporal-unit, card, snippet",
            self.input
        )
    }
}

impl std::error::Error for ParseTemplateTagTypeError {}

impl FromStr for TemplateTagType {
    type Err = ParseTemplateTagTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "string" is what older saved questions carry for text variables
            "text" | "string" => Ok(TemplateTagType::Text),
            "number" => Ok(TemplateTagType::Number),
            "date" => Ok(TemplateTagType::Date),
            "boolean" => Ok(TemplateTagType::Boolean),
            "dimension" => Ok(TemplateTagType::Dimension),
            "temporal-unit" => Ok(TemplateTagType::TemporalUnit),
            "card" => Ok(TemplateTagType::Card),
            "snippet" => Ok(TemplateTagType::Snippet),
            _ => Err(ParseTemplateTagTypeError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for TemplateTagType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TemplateTagType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for TemplateTagType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// TemplateTagKind
// ============================================================================

/// Type of a template tag together with the attributes only that type carries
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateTagKind {
    Text,
    Number,
    Date,
    Boolean,
    Dimension {
        dimension: Option<FieldReference>,
    },
    TemporalUnit {
        dimension: Option<FieldReference>,
    },
    Card {
        card_id: Option<i64>,
    },
    Snippet {
        snippet_id: Option<i64>,
        snippet_name: Option<String>,
    },
}

impl TemplateTagKind {
    /// A freshly typed tag: every type-specific attribute unset
    pub fn empty(tag_type: TemplateTagType) -> Self {
        match tag_type {
            TemplateTagType::Text => TemplateTagKind::Text,
            TemplateTagType::Number => TemplateTagKind::Number,
            TemplateTagType::Date => TemplateTagKind::Date,
            TemplateTagType::Boolean => TemplateTagKind::Boolean,
            TemplateTagType::Dimension => TemplateTagKind::Dimension { dimension: None },
            TemplateTagType::TemporalUnit => TemplateTagKind::TemporalUnit { dimension: None },
            TemplateTagType::Card => TemplateTagKind::Card { card_id: None },
            TemplateTagType::Snippet => TemplateTagKind::Snippet {
                snippet_id: None,
                snippet_name: None,
            },
        }
    }

    pub fn tag_type(&self) -> TemplateTagType {
        match self {
            TemplateTagKind::Text => TemplateTagType::Text,
            TemplateTagKind::Number => TemplateTagType::Number,
            TemplateTagKind::Date => TemplateTagType::Date,
            TemplateTagKind::Boolean => TemplateTagType::Boolean,
            TemplateTagKind::Dimension { .. } => TemplateTagType::Dimension,
            TemplateTagKind::TemporalUnit { .. } => TemplateTagType::TemporalUnit,
            TemplateTagKind::Card { .. } => TemplateTagType::Card,
            TemplateTagKind::Snippet { .. } => TemplateTagType::Snippet,
        }
    }

    /// The mapped column, for field filters and temporal-unit tags
    pub fn dimension(&self) -> Option<&FieldReference> {
        match self {
            TemplateTagKind::Dimension { dimension } | TemplateTagKind::TemporalUnit { dimension } => {
                dimension.as_ref()
            }
            _ => None,
        }
    }
}

// ============================================================================
// TemplateTag
// ============================================================================

/// A named `{{placeholder}}` inside a native query
///
/// `kind` is `None` when the stored tag has no `type` at all, which happens
/// for tags the user has typed but not configured yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTemplateTag", into = "RawTemplateTag")]
pub struct TemplateTag {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub kind: Option<TemplateTagKind>,
    pub widget_type: Option<String>,
    pub default: Option<Value>,
    pub required: Option<bool>,
    pub options: Option<Value>,
}

impl TemplateTag {
    /// New tag whose display name starts out as its name
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TemplateTagKind) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            display_name: name.clone(),
            name,
            kind: Some(kind),
            widget_type: None,
            default: None,
            required: None,
            options: None,
        }
    }

    pub fn with_widget_type(mut self, widget_type: impl Into<String>) -> Self {
        self.widget_type = Some(widget_type.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn tag_type(&self) -> Option<TemplateTagType> {
        self.kind.as_ref().map(TemplateTagKind::tag_type)
    }

    pub fn dimension(&self) -> Option<&FieldReference> {
        self.kind.as_ref().and_then(TemplateTagKind::dimension)
    }

    pub fn field_id(&self) -> Option<FieldId> {
        self.dimension().map(|d| d.field_id)
    }

    pub fn is_dimension(&self) -> bool {
        matches!(self.kind, Some(TemplateTagKind::Dimension { .. }))
    }

    pub fn is_temporal_unit(&self) -> bool {
        matches!(self.kind, Some(TemplateTagKind::TemporalUnit { .. }))
    }

    /// Tags bound to a column rather than substituted as a literal
    pub fn is_field_filter(&self) -> bool {
        self.is_dimension() || self.is_temporal_unit()
    }
}

/// Wire shape of a template tag (kebab-case keys, flat attributes)
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawTemplateTag {
    id: String,
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    tag_type: Option<TemplateTagType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    widget_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dimension: Option<FieldReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    snippet_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    snippet_name: Option<String>,
}

impl From<RawTemplateTag> for TemplateTag {
    fn from(raw: RawTemplateTag) -> Self {
        // Attributes that don't belong to the tag's type are dropped
        let RawTemplateTag { dimension, card_id, snippet_id, snippet_name, .. } = raw;
        let kind = raw.tag_type.map(|tag_type| match tag_type {
            TemplateTagType::Dimension => TemplateTagKind::Dimension { dimension },
            TemplateTagType::TemporalUnit => TemplateTagKind::TemporalUnit { dimension },
            TemplateTagType::Card => TemplateTagKind::Card { card_id },
            TemplateTagType::Snippet => TemplateTagKind::Snippet { snippet_id, snippet_name },
            other => TemplateTagKind::empty(other),
        });

        TemplateTag {
            id: raw.id,
            name: raw.name,
            display_name: raw.display_name,
            kind,
            widget_type: raw.widget_type,
            default: raw.default,
            required: raw.required,
            options: raw.options,
        }
    }
}

impl From<TemplateTag> for RawTemplateTag {
    fn from(tag: TemplateTag) -> Self {
        let mut raw = RawTemplateTag {
            id: tag.id,
            name: tag.name,
            display_name: tag.display_name,
            tag_type: tag.kind.as_ref().map(TemplateTagKind::tag_type),
            widget_type: tag.widget_type,
            dimension: None,
            default: tag.default,
            required: tag.required,
            options: tag.options,
            card_id: None,
            snippet_id: None,
            snippet_name: None,
        };

        match tag.kind {
            Some(TemplateTagKind::Dimension { dimension }) | Some(TemplateTagKind::TemporalUnit { dimension }) => {
                raw.dimension = dimension;
            }
            Some(TemplateTagKind::Card { card_id }) => raw.card_id = card_id,
            Some(TemplateTagKind::Snippet { snippet_id, snippet_name }) => {
                raw.snippet_id = snippet_id;
                raw.snippet_name = snippet_name;
            }
            _ => {}
        }

        raw
    }
}
