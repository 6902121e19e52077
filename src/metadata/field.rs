use serde::{Deserialize, Serialize};

use crate::model::FieldId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub engine: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub db_id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub schema: Option<String>,
}

/// A database column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub table_id: Option<i64>,
    /// Storage type, e.g. `type/Text`
    pub base_type: String,
    /// Meaning of the values, e.g. `type/PK` or `type/City`
    #[serde(default)]
    pub semantic_type: Option<String>,
    /// Distinct values seen when the column was last fingerprinted
    #[serde(default)]
    pub distinct_count: Option<u64>,
}

const DATE_TYPES: &[&str] = &[
    "type/Date",
    "type/DateTime",
    "type/DateTimeWithTZ",
    "type/DateTimeWithLocalTZ",
    "type/DateTimeWithZoneOffset",
    "type/DateTimeWithZoneID",
    "type/Temporal",
];

const NUMERIC_TYPES: &[&str] = &[
    "type/Number",
    "type/Integer",
    "type/BigInteger",
    "type/Float",
    "type/Decimal",
];

const STRING_TYPES: &[&str] = &["type/Text", "type/TextLike"];

const LOCATION_TYPES: &[&str] = &[
    "type/Address",
    "type/City",
    "type/State",
    "type/Country",
    "type/ZipCode",
];

impl Field {
    pub fn new(id: FieldId, name: impl Into<String>, base_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            table_id: None,
            base_type: base_type.into(),
            semantic_type: None,
            distinct_count: None,
        }
    }

    pub fn with_semantic_type(mut self, semantic_type: impl Into<String>) -> Self {
        self.semantic_type = Some(semantic_type.into());
        self
    }

    pub fn with_table(mut self, table_id: i64) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn with_distinct_count(mut self, distinct_count: u64) -> Self {
        self.distinct_count = Some(distinct_count);
        self
    }

    fn has_semantic_type(&self, types: &[&str]) -> bool {
        self.semantic_type
            .as_deref()
            .is_some_and(|t| types.contains(&t))
    }

    pub fn is_date(&self) -> bool {
        DATE_TYPES.contains(&self.base_type.as_str())
    }

    pub fn is_numeric(&self) -> bool {
        NUMERIC_TYPES.contains(&self.base_type.as_str())
    }

    pub fn is_string(&self) -> bool {
        STRING_TYPES.contains(&self.base_type.as_str())
    }

    pub fn is_boolean(&self) -> bool {
        self.base_type == "type/Boolean"
    }

    pub fn is_pk(&self) -> bool {
        self.has_semantic_type(&["type/PK"])
    }

    pub fn is_fk(&self) -> bool {
        self.has_semantic_type(&["type/FK"])
    }

    /// Primary or foreign key
    pub fn is_id(&self) -> bool {
        self.is_pk() || self.is_fk()
    }

    pub fn is_location(&self) -> bool {
        self.has_semantic_type(LOCATION_TYPES)
    }

    pub fn is_category(&self) -> bool {
        self.has_semantic_type(&["type/Category"])
    }
}
