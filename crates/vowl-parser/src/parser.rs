//! Payload deserialization and record elaboration.
//!
//! The raw serde structs mirror the wire shape one to one; [`parse`] joins
//! the id/type arrays with their attribute arrays and maps wire type names
//! onto the engine's element kinds.

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use vowl_core::elements::{Cardinality, LanguageMap, NodeKind, PropertyKind};

use crate::error::Result;

/// A schema class joined with its attributes.
#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub id: String,
    pub kind: NodeKind,
    pub labels: LanguageMap,
}

/// A schema property joined with its attributes.
///
/// `domain`, `range` and `inverse` are ids into the class and property
/// record lists; the engine resolves them into shared element handles.
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub id: String,
    pub kind: PropertyKind,
    pub labels: LanguageMap,
    pub domain: String,
    pub range: String,
    pub inverse: Option<String>,
    pub domain_cardinality: Option<Cardinality>,
    pub range_cardinality: Option<Cardinality>,
}

/// The elaborated payload.
#[derive(Debug, Clone, Default)]
pub struct OntologyData {
    pub classes: Vec<ClassRecord>,
    pub properties: Vec<PropertyRecord>,
}

#[derive(Debug, Deserialize, Default)]
struct RawPayload {
    #[serde(default)]
    class: Vec<RawElement>,
    #[serde(rename = "classAttribute", default)]
    class_attribute: Vec<RawClassAttribute>,
    #[serde(default)]
    property: Vec<RawElement>,
    #[serde(rename = "propertyAttribute", default)]
    property_attribute: Vec<RawPropertyAttribute>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    id: String,
    #[serde(rename = "type", default)]
    element_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawClassAttribute {
    id: String,
    #[serde(default)]
    label: Option<RawLabel>,
}

#[derive(Debug, Deserialize)]
struct RawPropertyAttribute {
    id: String,
    #[serde(default)]
    label: Option<RawLabel>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    inverse: Option<String>,
    #[serde(default)]
    cardinality: Option<RawNumber>,
    #[serde(rename = "minCardinality", default)]
    min_cardinality: Option<RawNumber>,
    #[serde(rename = "maxCardinality", default)]
    max_cardinality: Option<RawNumber>,
}

/// Labels arrive either as a bare string or as a language→text map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Plain(String),
    ByLanguage(IndexMap<String, String>),
}

impl RawLabel {
    fn into_language_map(self) -> LanguageMap {
        match self {
            Self::Plain(text) => LanguageMap::from_default(text),
            Self::ByLanguage(entries) => {
                let mut labels = LanguageMap::new();
                for (language, text) in entries {
                    labels.insert(language, text);
                }
                labels
            }
        }
    }
}

/// Cardinality bounds arrive as numbers or as quoted digit strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(u32),
    Text(String),
}

impl RawNumber {
    fn value(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Parses a VOWL JSON payload into elaborated class and property records.
pub fn parse(payload: &str) -> Result<OntologyData> {
    let raw: RawPayload = serde_json::from_str(payload)?;

    let class_attributes: IndexMap<&str, &RawClassAttribute> = raw
        .class_attribute
        .iter()
        .map(|attr| (attr.id.as_str(), attr))
        .collect();
    let property_attributes: IndexMap<&str, &RawPropertyAttribute> = raw
        .property_attribute
        .iter()
        .map(|attr| (attr.id.as_str(), attr))
        .collect();

    let mut classes = Vec::with_capacity(raw.class.len());
    for element in &raw.class {
        let kind = node_kind(element.element_type.as_deref());
        let labels = class_attributes
            .get(element.id.as_str())
            .and_then(|attr| attr.label.clone())
            .map(RawLabel::into_language_map)
            .unwrap_or_default();
        classes.push(ClassRecord {
            id: element.id.clone(),
            kind,
            labels,
        });
    }

    let known_class = |id: &str| classes.iter().any(|c| c.id == id);

    let mut properties = Vec::with_capacity(raw.property.len());
    for element in &raw.property {
        let Some(attr) = property_attributes.get(element.id.as_str()) else {
            warn!(property = element.id.as_str(); "property has no attribute entry, skipping");
            continue;
        };
        let (Some(domain), Some(range)) = (attr.domain.as_deref(), attr.range.as_deref()) else {
            warn!(property = element.id.as_str(); "property lacks domain or range, skipping");
            continue;
        };
        if !known_class(domain) || !known_class(range) {
            warn!(property = element.id.as_str(), domain = domain, range = range;
                "property references unknown class, skipping");
            continue;
        }

        let (domain_cardinality, range_cardinality) = cardinalities(attr);
        properties.push(PropertyRecord {
            id: element.id.clone(),
            kind: property_kind(element.element_type.as_deref()),
            labels: attr
                .label
                .clone()
                .map(RawLabel::into_language_map)
                .unwrap_or_default(),
            domain: domain.to_string(),
            range: range.to_string(),
            inverse: attr.inverse.clone(),
            domain_cardinality,
            range_cardinality,
        });
    }

    // An inverse must point at a surviving property; half a pair is dropped
    // back to a plain property.
    let property_ids: Vec<String> = properties.iter().map(|p| p.id.clone()).collect();
    for property in &mut properties {
        if let Some(inverse) = &property.inverse
            && !property_ids.contains(inverse)
        {
            warn!(property = property.id.as_str(), inverse = inverse.as_str();
                "inverse references unknown property, ignoring pairing");
            property.inverse = None;
        }
    }

    Ok(OntologyData {
        classes,
        properties,
    })
}

fn node_kind(element_type: Option<&str>) -> NodeKind {
    match element_type {
        Some("owl:Thing") => NodeKind::Thing,
        Some("rdfs:Datatype") => NodeKind::Datatype,
        Some("rdfs:Literal") => NodeKind::Literal,
        Some("owl:Class") | None => NodeKind::Class,
        Some(other) => {
            warn!(element_type = other; "unknown class type, treating as owl:Class");
            NodeKind::Class
        }
    }
}

fn property_kind(element_type: Option<&str>) -> PropertyKind {
    match element_type {
        Some("owl:DatatypeProperty") => PropertyKind::Datatype,
        Some("rdfs:SubClassOf") => PropertyKind::SubclassOf,
        Some("owl:ObjectProperty") | None => PropertyKind::Object,
        Some(other) => {
            warn!(element_type = other; "unknown property type, treating as owl:ObjectProperty");
            PropertyKind::Object
        }
    }
}

/// VOWL carries either one exact `cardinality` or a min/max pair. Both
/// annotate the range end; the domain end is unbounded in the wire format.
fn cardinalities(
    attr: &RawPropertyAttribute,
) -> (Option<Cardinality>, Option<Cardinality>) {
    if let Some(exact) = attr.cardinality.as_ref().and_then(RawNumber::value) {
        return (None, Some(Cardinality::new(exact, Some(exact))));
    }

    let min = attr.min_cardinality.as_ref().and_then(RawNumber::value);
    let max = attr.max_cardinality.as_ref().and_then(RawNumber::value);
    match (min, max) {
        (None, None) => (None, None),
        (min, max) => (None, Some(Cardinality::new(min.unwrap_or(0), max))),
    }
}
