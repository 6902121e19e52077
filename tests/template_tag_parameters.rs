//! Integration tests for deriving parameters from a card's template tags
//!
//! Uses a native card fixture with one tag of every kind and a stored values
//! config on some of its parameters.

mod common;

use common::{create_mock_native_card, create_mock_parameter, create_mock_template_tag, load_card};
use nativeparams::mapper::{
    get_parameters_from_card, get_template_tag_parameter, get_template_tag_parameters_from_card,
    get_template_tags, orphaned_card_parameters,
};
use nativeparams::model::{
    FieldReference, ParameterTarget, TargetReference, TemplateTagKind, TemporalUnit,
    ValuesQueryType, ValuesSourceType,
};
use nativeparams::parser;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_template_tags_keep_query_order() {
    let card = load_card("orders_card.yaml");
    let names: Vec<&str> = get_template_tags(&card).iter().map(|t| t.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["category", "created_at", "min_total", "vendor", "unit", "snippet: active", "#5-products", "pending"]
    );
}

#[test]
fn test_only_filterable_tags_become_parameters() {
    let card = load_card("orders_card.yaml");
    let parameters = get_template_tag_parameters_from_card(&card);

    // snippet and card tags compose the query; `pending` has no field and no widget
    let ids: Vec<&str> = parameters.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["tag-category", "tag-created-at", "tag-min-total", "tag-vendor", "tag-unit"]);

    let types: Vec<&str> = parameters.iter().map(|p| p.parameter_type.as_str()).collect();
    assert_eq!(types, vec!["string/=", "date/all-options", "number/=", "string/=", "temporal-unit"]);
}

#[test]
fn test_stored_values_config_is_merged_by_id() {
    let card = load_card("orders_card.yaml");
    let parameters = get_template_tag_parameters_from_card(&card);

    let category = &parameters[0];
    assert_eq!(category.values_query_type, Some(ValuesQueryType::List));
    assert_eq!(category.values_source_type, Some(ValuesSourceType::StaticList));
    assert_eq!(
        category.values_source_config.as_ref().and_then(|c| c.values.clone()),
        Some(vec![json!("Doohickey"), json!("Gadget"), json!("Gizmo"), json!("Widget")])
    );
    assert_eq!(category.temporal_units, None);

    let unit = &parameters[4];
    assert_eq!(unit.temporal_units, Some(vec![TemporalUnit::Month, TemporalUnit::Year]));
    assert_eq!(
        unit.target,
        Some(ParameterTarget::Dimension(TargetReference::TemplateTag("unit".into())))
    );

    // units stored on a non temporal-unit parameter never surface
    let min_total = &parameters[2];
    assert_eq!(min_total.temporal_units, None);
}

#[test]
fn test_parameter_wire_format() {
    let card = load_card("orders_card.yaml");
    let min_total = card.template_tag("min_total").unwrap();

    let value = serde_json::to_value(get_template_tag_parameter(min_total, None)).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "tag-min-total",
            "type": "number/=",
            "target": ["variable", ["template-tag", "min_total"]],
            "name": "Min Total",
            "slug": "min_total",
            "default": 10
        })
    );
}

#[test]
fn test_explicit_card_parameters_win() {
    let card = load_card("orders_card.yaml");
    let parameters = get_parameters_from_card(&card);

    assert_eq!(parameters, card.parameters.clone().unwrap());
    assert!(orphaned_card_parameters(&card).is_empty());
}

#[test]
fn test_parameters_derived_when_card_has_none() {
    let card = create_mock_native_card(
        "SELECT * FROM PRODUCTS WHERE {{category}} AND PRICE > {{price}}",
        vec![
            create_mock_template_tag("category", TemplateTagKind::Dimension {
                dimension: Some(FieldReference::new(3)),
            }),
            create_mock_template_tag("price", TemplateTagKind::Number),
        ],
    );

    let parameters = get_parameters_from_card(&card);
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0].id, "category-id");
    assert_eq!(parameters[0].parameter_type, "category");
    assert_eq!(parameters[1].slug, "price");
    assert_eq!(
        parameters[1].target,
        Some(ParameterTarget::Variable(TargetReference::TemplateTag("price".into())))
    );
}

#[test]
fn test_orphaned_parameters_are_reported() {
    let mut card = create_mock_native_card(
        "SELECT * FROM PRODUCTS WHERE CATEGORY = {{category}}",
        vec![create_mock_template_tag("category", TemplateTagKind::Text)],
    );
    card.parameters = Some(vec![
        create_mock_parameter("category-id", "string/=")
            .with_target(ParameterTarget::Variable(TargetReference::TemplateTag("category".into()))),
        create_mock_parameter("renamed-id", "string/=")
            .with_target(ParameterTarget::Variable(TargetReference::TemplateTag("old_name".into()))),
    ]);

    let orphaned: Vec<&str> = orphaned_card_parameters(&card).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(orphaned, vec!["renamed-id"]);
    // still returned as-is
    assert_eq!(get_parameters_from_card(&card).len(), 2);
}

#[test]
fn test_card_survives_json_round_trip() {
    let card = load_card("orders_card.yaml");
    let json = parser::card_to_json(&card).unwrap();
    let reparsed = parser::parse_card_str(&json).unwrap();

    assert_eq!(reparsed, card);
    assert!(json.contains("\"template-tags\""));
    assert!(json.contains("\"snippet-name\": \"active\""));
}

#[test]
fn test_card_file_from_temp_dir() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"name": "Q", "dataset_query": {{"type": "native", "native": {{"query": "SELECT {{{{x}}}}", "template-tags": {{"x": {{"id": "x1", "name": "x", "type": "number"}}}}}}}}}}"#
    )
    .unwrap();

    let card = parser::parse_card_file(file.path()).unwrap();
    let parameters = get_parameters_from_card(&card);
    assert_eq!(parameters[0].parameter_type, "number/=");
    assert_eq!(parameters[0].name, "");
}
