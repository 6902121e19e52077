//! Shared test utilities for integration tests

#![allow(dead_code)]

use nativeparams::metadata::Metadata;
use nativeparams::model::{
    Card, Dataset, DatasetQuery, NativeQuery, Parameter, ResultColumn, Series, SingleSeries,
    TemplateTag, TemplateTagKind,
};
use nativeparams::parser;
use nativeparams::query::{QueryStage, StructuredQuery};

fn fixture_path(name: &str) -> String {
    format!("tests/test_data/{}", name)
}

/// Load a card fixture from the tests/test_data directory
pub fn load_card(name: &str) -> Card {
    parser::parse_card_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load test card {}: {}", name, e))
}

/// Load a metadata fixture from the tests/test_data directory
pub fn load_metadata(name: &str) -> Metadata {
    parser::parse_metadata_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load test metadata {}: {}", name, e))
}

pub fn load_parameters(name: &str) -> Vec<Parameter> {
    parser::parse_parameters_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load test parameters {}: {}", name, e))
}

// =============================================================================
// Mock builders
// =============================================================================

/// A structured question over ORDERS with a single empty stage
pub fn create_mock_card() -> Card {
    Card {
        id: Some(1),
        name: "Question".to_string(),
        display: "table".to_string(),
        dataset_query: Some(DatasetQuery::Query {
            database: Some(1),
            query: StructuredQuery {
                stages: vec![QueryStage {
                    source_table: Some(2),
                    filters: vec![],
                }],
            },
        }),
        parameters: None,
    }
}

/// A native question whose template tags are keyed by name, in the given order
pub fn create_mock_native_card(query: &str, tags: Vec<TemplateTag>) -> Card {
    let mut native = NativeQuery {
        query: query.to_string(),
        ..Default::default()
    };
    for tag in tags {
        native.template_tags.insert(tag.name.clone(), tag);
    }

    Card {
        dataset_query: Some(DatasetQuery::Native {
            database: Some(1),
            native,
        }),
        ..create_mock_card()
    }
}

/// Tag with id `<name>-id` and display name equal to its name
pub fn create_mock_template_tag(name: &str, kind: TemplateTagKind) -> TemplateTag {
    TemplateTag::new(format!("{}-id", name), name, kind)
}

pub fn create_mock_parameter(id: &str, parameter_type: &str) -> Parameter {
    let mut parameter = Parameter::new(id, parameter_type);
    parameter.name = id.to_string();
    parameter.slug = id.to_string();
    parameter
}

pub fn create_mock_single_series(card: Card, rows: Vec<Vec<serde_json::Value>>) -> SingleSeries {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    let cols = (0..width)
        .map(|i| ResultColumn {
            name: format!("col_{}", i),
            display_name: format!("Column {}", i),
            base_type: "type/Text".to_string(),
        })
        .collect();

    SingleSeries {
        card,
        data: Dataset {
            cols,
            row_count: rows.len(),
            rows,
        },
    }
}

/// One empty series per name; names default to "Series"
pub fn create_mock_series(names: &[&str]) -> Series {
    let names: Vec<&str> = if names.is_empty() { vec!["Series"] } else { names.to_vec() };
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let card = Card {
                id: Some(i as i64 + 1),
                name: name.to_string(),
                ..create_mock_card()
            };
            create_mock_single_series(card, vec![])
        })
        .collect()
}
