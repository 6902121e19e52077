use serde::Serialize;
use serde_json::Value;

use super::error::FilterError;
use crate::query::{FilterClause, FilterOperator, StructuredQuery};

/// One filter as shown in the question header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPill {
    pub stage_index: usize,
    pub filter_index: usize,
    pub label: String,
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "empty".to_string(),
        other => other.to_string(),
    }
}

fn first_value(filter: &FilterClause) -> String {
    filter.values.first().map(format_value).unwrap_or_default()
}

/// Human-readable description, e.g. "User → Source is Organic"
pub fn filter_label(filter: &FilterClause) -> String {
    let column = filter.column.long_display_name();
    let value = first_value(filter);
    let count = filter.values.len();

    match filter.operator {
        FilterOperator::Eq if count > 1 => format!("{} is {} selections", column, count),
        FilterOperator::Eq => format!("{} is {}", column, value),
        FilterOperator::Ne if count > 1 => format!("{} excludes {} selections", column, count),
        FilterOperator::Ne => format!("{} is not {}", column, value),
        FilterOperator::Gt => format!("{} is greater than {}", column, value),
        FilterOperator::Lt => format!("{} is less than {}", column, value),
        FilterOperator::Ge => format!("{} is greater than or equal to {}", column, value),
        FilterOperator::Le => format!("{} is less than or equal to {}", column, value),
        FilterOperator::Between => {
            let end = filter.values.get(1).map(format_value).unwrap_or_default();
            format!("{} is between {} and {}", column, value, end)
        }
        FilterOperator::IsNull | FilterOperator::IsEmpty => format!("{} is empty", column),
        FilterOperator::NotNull | FilterOperator::NotEmpty => format!("{} is not empty", column),
        FilterOperator::Contains => format!("{} contains {}", column, value),
        FilterOperator::DoesNotContain => format!("{} does not contain {}", column, value),
        FilterOperator::StartsWith => format!("{} starts with {}", column, value),
        FilterOperator::EndsWith => format!("{} ends with {}", column, value),
    }
}

/// Pills for the filters of every stage, first stage first
///
/// A collapsed header shows nothing.
pub fn filter_pills(query: &StructuredQuery, expanded: bool) -> Vec<FilterPill> {
    if !expanded {
        return vec![];
    }

    query
        .stages
        .iter()
        .enumerate()
        .flat_map(|(stage_index, stage)| {
            stage
                .filters
                .iter()
                .enumerate()
                .map(move |(filter_index, filter)| FilterPill {
                    stage_index,
                    filter_index,
                    label: filter_label(filter),
                })
        })
        .collect()
}

fn check_position(
    query: &StructuredQuery,
    stage_index: usize,
    filter_index: usize,
) -> Result<(), FilterError> {
    let stage = query.stages.get(stage_index).ok_or(FilterError::StageNotFound {
        stage_index,
        stage_count: query.stages.len(),
    })?;
    if filter_index >= stage.filters.len() {
        return Err(FilterError::FilterNotFound { stage_index, filter_index });
    }
    Ok(())
}

/// Replace one filter, leaving every other stage as it was
pub fn update_filter(
    query: &StructuredQuery,
    stage_index: usize,
    filter_index: usize,
    filter: FilterClause,
) -> Result<StructuredQuery, FilterError> {
    check_position(query, stage_index, filter_index)?;
    if !filter.operator.accepts_value_count(filter.values.len()) {
        return Err(FilterError::WrongValueCount {
            operator: filter.operator.as_str().to_string(),
            actual: filter.values.len(),
        });
    }

    let mut next = query.clone();
    next.stages[stage_index].filters[filter_index] = filter;
    Ok(next)
}

pub fn remove_filter(
    query: &StructuredQuery,
    stage_index: usize,
    filter_index: usize,
) -> Result<StructuredQuery, FilterError> {
    check_position(query, stage_index, filter_index)?;

    let mut next = query.clone();
    next.stages[stage_index].filters.remove(filter_index);
    Ok(next)
}
