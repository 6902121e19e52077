//! Integration tests for the template tag editor over an in-memory card
//!
//! Each test builds a `TagEditor` from a snapshot of the store's tag and
//! parameter, applies one change, then inspects the store.

mod common;

use common::{create_mock_native_card, create_mock_template_tag, load_card, load_metadata};
use nativeparams::config::EditorConfig;
use nativeparams::editor::{CardStore, FieldFetcher, TagEditor, TagEditorProps, TagStore};
use nativeparams::mapper::get_parameters_from_card;
use nativeparams::metadata::Metadata;
use nativeparams::model::{
    Card, FieldReference, Parameter, TemplateTag, TemplateTagKind, TemplateTagType, TemporalUnit,
    ValuesQueryType, ValuesSourceType,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[derive(Default)]
struct RecordingFetcher {
    fetched: Vec<(i64, bool)>,
}

impl FieldFetcher for RecordingFetcher {
    fn fetch_field(&mut self, field_id: i64, force: bool) {
        self.fetched.push((field_id, force));
    }
}

fn snapshot(store: &CardStore, name: &str) -> (TemplateTag, Option<Parameter>) {
    let tag = store.template_tag(name).unwrap().clone();
    let parameter = store.parameter(&tag.id);
    (tag, parameter)
}

fn stored_parameter<'a>(card: &'a Card, id: &str) -> Option<&'a Parameter> {
    card.parameters.as_ref()?.iter().find(|p| p.id == id)
}

/// Switch a tag's type the way the variable type select does
fn change_type(store: &mut CardStore, original: &Card, name: &str, new_type: TemplateTagType) {
    let metadata = Metadata::default();
    let config = EditorConfig::default();
    let (tag, parameter) = snapshot(store, name);

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    props.original_card = Some(original);
    TagEditor::new(props, store).set_type(new_type);
}

#[test]
fn test_mount_uses_configured_reload() {
    let card = load_card("orders_card.yaml");
    let metadata = load_metadata("sample_metadata.yaml");
    let config = EditorConfig::from_file("tests/test_data/editor_config.yaml").unwrap();
    let mut store = CardStore::new(card.clone());
    let mut fetcher = RecordingFetcher::default();

    for name in ["category", "min_total", "unit"] {
        let tag = card.template_tag(name).unwrap();
        let props = TagEditorProps::new(tag, &metadata, &config);
        TagEditor::new(props, &mut store).mount(&mut fetcher);
    }

    // only the field filter loads its field; temporal-unit and number tags don't
    assert_eq!(fetcher.fetched, vec![(3, false)]);
}

#[test]
fn test_type_change_clears_config_unless_saved_card_agrees() {
    let original = load_card("orders_card.yaml");
    let mut store = CardStore::new(original.clone());
    store.set_parameter_value("tag-category", Some(json!(["Gizmo"])));

    change_type(&mut store, &original, "category", TemplateTagType::Text);

    let tag = store.template_tag("category").unwrap();
    assert_eq!(tag.tag_type(), Some(TemplateTagType::Text));
    assert_eq!(tag.widget_type, None);
    assert_eq!(tag.dimension(), None);

    let parameter = store.parameter("tag-category").unwrap();
    assert_eq!(parameter.parameter_type, "string/=");
    assert_eq!(parameter.value, None);
    // the saved card has `category` as a field filter, not text
    assert_eq!(parameter.values_query_type, None);
    assert_eq!(parameter.values_source_config, None);

    // switching back to the saved type restores the saved source settings
    change_type(&mut store, &original, "category", TemplateTagType::Dimension);

    let tag = store.template_tag("category").unwrap();
    assert_eq!(tag.widget_type.as_deref(), Some("none"));
    let stored = stored_parameter(&store.card, "tag-category").unwrap();
    assert_eq!(stored.values_query_type, Some(ValuesQueryType::List));
    assert_eq!(stored.values_source_type, Some(ValuesSourceType::StaticList));
    // unmapped field filter with no widget exposes no parameter yet
    assert!(store.parameter("tag-category").is_none());
}

#[test]
fn test_type_change_without_saved_card_resets_config() {
    let original = load_card("orders_card.yaml");
    let mut store = CardStore::new(original.clone());
    let unsaved = create_mock_native_card("SELECT 1", vec![]);

    change_type(&mut store, &unsaved, "category", TemplateTagType::Text);
    change_type(&mut store, &unsaved, "category", TemplateTagType::Dimension);

    let stored = stored_parameter(&store.card, "tag-category").unwrap();
    assert!(stored.values_config().is_empty());
}

#[test]
fn test_map_field_picks_widget_from_metadata() {
    let metadata = load_metadata("sample_metadata.yaml");
    let config = EditorConfig::default();
    let tag = create_mock_template_tag("product", TemplateTagKind::Dimension { dimension: None })
        .with_widget_type("none");
    let mut store = CardStore::new(create_mock_native_card("SELECT * FROM PRODUCTS WHERE {{product}}", vec![tag.clone()]));

    let props = TagEditorProps::new(&tag, &metadata, &config);
    TagEditor::new(props, &mut store).set_dimension(6);

    // TITLE has 200 distinct values
    let mapped = store.template_tag("product").unwrap();
    assert_eq!(mapped.dimension(), Some(&FieldReference::new(6)));
    assert_eq!(mapped.widget_type.as_deref(), Some("string/contains"));
    assert_eq!(mapped.options, Some(json!({"case-sensitive": false})));

    let parameter = store.parameter("product-id").unwrap();
    assert_eq!(parameter.parameter_type, "string/contains");
}

#[test]
fn test_map_field_to_low_cardinality_text() {
    let metadata = load_metadata("sample_metadata.yaml");
    let config = EditorConfig::default();
    let tag = create_mock_template_tag("product", TemplateTagKind::Dimension { dimension: None });
    let mut store = CardStore::new(create_mock_native_card("SELECT 1 WHERE {{product}}", vec![tag.clone()]));

    let props = TagEditorProps::new(&tag, &metadata, &config);
    TagEditor::new(props, &mut store).set_dimension(3);

    let mapped = store.template_tag("product").unwrap();
    assert_eq!(mapped.widget_type.as_deref(), Some("string/="));
    assert_eq!(mapped.options, None);
}

#[test]
fn test_required_pushes_default_into_value() {
    let metadata = Metadata::default();
    let config = EditorConfig::default();
    let mut store = CardStore::new(load_card("orders_card.yaml"));
    let (tag, parameter) = snapshot(&store, "min_total");

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    TagEditor::new(props, &mut store).set_required(true);

    assert_eq!(store.template_tag("min_total").unwrap().required, Some(true));
    assert_eq!(store.parameter("tag-min-total").unwrap().value, Some(json!(10)));
}

#[test]
fn test_default_value_is_stored_and_picked() {
    let metadata = Metadata::default();
    let config = EditorConfig::default();
    let mut store = CardStore::new(load_card("orders_card.yaml"));
    let (tag, parameter) = snapshot(&store, "vendor");

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    TagEditor::new(props, &mut store).set_default_value(Some(json!("Globex")));

    let parameter = store.parameter("tag-vendor").unwrap();
    assert_eq!(parameter.default, Some(json!("Globex")));
    assert_eq!(parameter.value, Some(json!("Globex")));
}

#[test]
fn test_narrowing_temporal_units_drops_stale_default() {
    let metadata = Metadata::default();
    let config = EditorConfig::default();
    let mut store = CardStore::new(load_card("orders_card.yaml"));
    let unit = store.template_tag("unit").unwrap().clone().with_default(json!("year"));
    store.set_template_tag(unit);
    store.set_parameter_value("tag-unit", Some(json!("year")));
    let (tag, parameter) = snapshot(&store, "unit");

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    TagEditor::new(props, &mut store).set_temporal_units(vec![TemporalUnit::Month, TemporalUnit::Day]);

    let parameter = store.parameter("tag-unit").unwrap();
    assert_eq!(parameter.temporal_units, Some(vec![TemporalUnit::Month, TemporalUnit::Day]));
    assert_eq!(parameter.default, None);
    assert_eq!(parameter.value, None);
}

#[test]
fn test_unchanged_widget_type_leaves_card_alone() {
    let metadata = Metadata::default();
    let config = EditorConfig::default();
    let mut store = CardStore::new(load_card("orders_card.yaml"));
    store.set_parameter_value("tag-category", Some(json!(["Gizmo"])));
    let before = store.card.clone();
    let (tag, parameter) = snapshot(&store, "category");

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    let mut editor = TagEditor::new(props, &mut store);
    editor.set_widget_type("string/=");
    editor.set_query_type(ValuesQueryType::List);

    assert_eq!(store.card, before);
    assert_eq!(store.parameter("tag-category").unwrap().value, Some(json!(["Gizmo"])));
}

#[test]
fn test_view_of_mapped_field_filter() {
    let metadata = load_metadata("sample_metadata.yaml");
    let config = EditorConfig::default();
    let mut store = CardStore::new(load_card("orders_card.yaml"));
    let (tag, parameter) = snapshot(&store, "category");

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    props.database = metadata.database(1);
    props.databases = &metadata.databases;
    let view = TagEditor::new(props, &mut store).view();

    assert_eq!(view.variable_name, "category");
    let mapping = view.field_mapping.unwrap();
    assert_eq!(mapping.selected_database_id, Some(1));
    assert_eq!(mapping.selected_table_id, Some(5));
    assert_eq!(mapping.selected_field_id, Some(3));
    assert_eq!(view.widget_type_select.unwrap().value, "string/=");
    assert_eq!(view.label_input.as_deref(), Some("Category"));
    assert!(view.values_source_settings);
    assert!(!view.temporal_unit_settings);
}

#[test]
fn test_first_config_on_unsaved_card_keeps_sibling_tags() {
    let metadata = Metadata::default();
    let config = EditorConfig::default();
    let card = create_mock_native_card(
        "SELECT * FROM ORDERS WHERE VENDOR = {{ta}} AND TOTAL > {{tb}}",
        vec![
            create_mock_template_tag("ta", TemplateTagKind::Text),
            create_mock_template_tag("tb", TemplateTagKind::Number),
        ],
    );
    let original = card.clone();
    let mut store = CardStore::new(card);
    let (tag, parameter) = snapshot(&store, "ta");

    let mut props = TagEditorProps::new(&tag, &metadata, &config);
    props.parameter = parameter.as_ref();
    TagEditor::new(props, &mut store).set_query_type(ValuesQueryType::Search);

    let ids: Vec<String> = get_parameters_from_card(&store.card).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["ta-id", "tb-id"]);

    change_type(&mut store, &original, "ta", TemplateTagType::Number);

    let types: Vec<(String, String)> = get_parameters_from_card(&store.card)
        .into_iter()
        .map(|p| (p.id, p.parameter_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("ta-id".to_string(), "number/=".to_string()),
            ("tb-id".to_string(), "number/=".to_string()),
        ]
    );
}
