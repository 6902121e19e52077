use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A query made of stages, each with its own filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredQuery {
    #[serde(default)]
    pub stages: Vec<QueryStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStage {
    /// Source table of the first stage; later stages read the previous stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_table: Option<i64>,
    #[serde(default)]
    pub filters: Vec<FilterClause>,
}

/// Column a filter applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    pub display_name: String,
    /// Display name of the foreign key the column is reached through (e.g. "User")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_display_name: Option<String>,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            fk_display_name: None,
        }
    }

    /// Column reached through a foreign key
    pub fn implicit(
        name: impl Into<String>,
        display_name: impl Into<String>,
        fk_display_name: impl Into<String>,
    ) -> Self {
        Self {
            fk_display_name: Some(fk_display_name.into()),
            ..Self::new(name, display_name)
        }
    }

    /// "User → Source" for implicitly joined columns, "Quantity" otherwise
    pub fn long_display_name(&self) -> String {
        match &self.fk_display_name {
            Some(fk) => format!("{} → {}", fk, self.display_name),
            None => self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "is-null")]
    IsNull,
    #[serde(rename = "not-null")]
    NotNull,
    #[serde(rename = "is-empty")]
    IsEmpty,
    #[serde(rename = "not-empty")]
    NotEmpty,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "does-not-contain")]
    DoesNotContain,
    #[serde(rename = "starts-with")]
    StartsWith,
    #[serde(rename = "ends-with")]
    EndsWith,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Ge => ">=",
            FilterOperator::Le => "<=",
            FilterOperator::Between => "between",
            FilterOperator::IsNull => "is-null",
            FilterOperator::NotNull => "not-null",
            FilterOperator::IsEmpty => "is-empty",
            FilterOperator::NotEmpty => "not-empty",
            FilterOperator::Contains => "contains",
            FilterOperator::DoesNotContain => "does-not-contain",
            FilterOperator::StartsWith => "starts-with",
            FilterOperator::EndsWith => "ends-with",
        }
    }

    /// Whether the operator can take `count` values
    ///
    /// `=`, `!=` and the text matchers take one or more values.
    pub fn accepts_value_count(&self, count: usize) -> bool {
        match self {
            FilterOperator::IsNull
            | FilterOperator::NotNull
            | FilterOperator::IsEmpty
            | FilterOperator::NotEmpty => count == 0,
            FilterOperator::Between => count == 2,
            FilterOperator::Gt | FilterOperator::Lt | FilterOperator::Ge | FilterOperator::Le => count == 1,
            FilterOperator::Eq
            | FilterOperator::Ne
            | FilterOperator::Contains
            | FilterOperator::DoesNotContain
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith => count >= 1,
        }
    }
}

/// One filter in a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub column: ColumnRef,
    pub operator: FilterOperator,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl FilterClause {
    pub fn new(column: ColumnRef, operator: FilterOperator, values: Vec<Value>) -> Self {
        Self { column, operator, values }
    }
}

impl StructuredQuery {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Filters of one stage; empty for a stage that doesn't exist
    pub fn filters(&self, stage_index: usize) -> &[FilterClause] {
        self.stages
            .get(stage_index)
            .map(|stage| stage.filters.as_slice())
            .unwrap_or(&[])
    }
}
