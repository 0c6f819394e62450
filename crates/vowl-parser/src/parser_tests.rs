//! Unit tests for the VOWL JSON payload parser.

use vowl_core::elements::{NodeKind, PropertyKind};

use crate::parser::parse;

fn parse_ok(payload: &str) -> crate::OntologyData {
    parse(payload).expect("payload should parse")
}

#[test]
fn test_empty_object_yields_empty_sets() {
    let data = parse_ok("{}");
    assert!(data.classes.is_empty());
    assert!(data.properties.is_empty());
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(parse("not json").is_err());
}

#[test]
fn test_classes_joined_with_attributes() {
    let data = parse_ok(
        r#"{
            "class": [
                {"id": "1", "type": "owl:Class"},
                {"id": "2", "type": "rdfs:Datatype"}
            ],
            "classAttribute": [
                {"id": "1", "label": "Person"},
                {"id": "2", "label": {"en": "string", "de": "Zeichenkette"}}
            ]
        }"#,
    );

    assert_eq!(data.classes.len(), 2);
    assert_eq!(data.classes[0].kind, NodeKind::Class);
    assert_eq!(data.classes[0].labels.label_for("en"), Some("Person"));
    assert_eq!(data.classes[1].kind, NodeKind::Datatype);
    assert_eq!(data.classes[1].labels.label_for("de"), Some("Zeichenkette"));
}

#[test]
fn test_property_with_domain_and_range() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "p", "type": "owl:ObjectProperty"}],
            "propertyAttribute": [
                {"id": "p", "label": "knows", "domain": "1", "range": "2"}
            ]
        }"#,
    );

    assert_eq!(data.properties.len(), 1);
    let p = &data.properties[0];
    assert_eq!(p.kind, PropertyKind::Object);
    assert_eq!(p.domain, "1");
    assert_eq!(p.range, "2");
    assert_eq!(p.labels.label_for("en"), Some("knows"));
}

#[test]
fn test_dangling_domain_is_skipped() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}],
            "property": [{"id": "p"}],
            "propertyAttribute": [
                {"id": "p", "domain": "missing", "range": "1"}
            ]
        }"#,
    );

    assert!(data.properties.is_empty());
    assert_eq!(data.classes.len(), 1);
}

#[test]
fn test_property_without_attribute_entry_is_skipped() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}],
            "property": [{"id": "p"}]
        }"#,
    );

    assert!(data.properties.is_empty());
}

#[test]
fn test_subclass_of_kind() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "s", "type": "rdfs:SubClassOf"}],
            "propertyAttribute": [{"id": "s", "domain": "1", "range": "2"}]
        }"#,
    );

    assert_eq!(data.properties[0].kind, PropertyKind::SubclassOf);
}

#[test]
fn test_inverse_pair_survives() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "p"}, {"id": "q"}],
            "propertyAttribute": [
                {"id": "p", "domain": "1", "range": "2", "inverse": "q"},
                {"id": "q", "domain": "2", "range": "1", "inverse": "p"}
            ]
        }"#,
    );

    assert_eq!(data.properties[0].inverse.as_deref(), Some("q"));
    assert_eq!(data.properties[1].inverse.as_deref(), Some("p"));
}

#[test]
fn test_dangling_inverse_is_cleared() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "p"}],
            "propertyAttribute": [
                {"id": "p", "domain": "1", "range": "2", "inverse": "gone"}
            ]
        }"#,
    );

    assert_eq!(data.properties[0].inverse, None);
}

#[test]
fn test_exact_cardinality() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "p"}],
            "propertyAttribute": [
                {"id": "p", "domain": "1", "range": "2", "cardinality": "3"}
            ]
        }"#,
    );

    let card = data.properties[0].range_cardinality.unwrap();
    assert_eq!(card.to_string(), "3");
}

#[test]
fn test_min_max_cardinality_as_numbers() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "p"}],
            "propertyAttribute": [
                {"id": "p", "domain": "1", "range": "2",
                 "minCardinality": 1, "maxCardinality": 5}
            ]
        }"#,
    );

    let card = data.properties[0].range_cardinality.unwrap();
    assert_eq!(card.to_string(), "1..5");
}

#[test]
fn test_min_only_cardinality_is_unbounded() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1"}, {"id": "2"}],
            "property": [{"id": "p"}],
            "propertyAttribute": [
                {"id": "p", "domain": "1", "range": "2", "minCardinality": "2"}
            ]
        }"#,
    );

    let card = data.properties[0].range_cardinality.unwrap();
    assert_eq!(card.to_string(), "2..*");
}

#[test]
fn test_unknown_types_fall_back() {
    let data = parse_ok(
        r#"{
            "class": [{"id": "1", "type": "owl:Mystery"}, {"id": "2"}],
            "property": [{"id": "p", "type": "owl:Exotic"}],
            "propertyAttribute": [{"id": "p", "domain": "1", "range": "2"}]
        }"#,
    );

    assert_eq!(data.classes[0].kind, NodeKind::Class);
    assert_eq!(data.properties[0].kind, PropertyKind::Object);
}
