#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! OSM element records and shaped JSON document types.
//!
//! This crate contains only data types. It has no XML or JSON I/O of its
//! own; the reader produces [`RawElement`]s and the shaper turns them into
//! [`ShapedDocument`]s.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Attribute keys that describe who created a record and when.
pub const PROVENANCE_KEYS: &[&str] = &["version", "changeset", "timestamp", "user", "uid"];

/// Top-level document keys that attributes and sub-tags may never overwrite.
pub const RESERVED_KEYS: &[&str] = &["created", "pos", "node_refs", "address"];

/// The kinds of OSM element that are shaped into documents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// A single point with coordinates.
    Node,
    /// An ordered list of node references.
    Way,
}

/// A single `<tag k=".." v=".."/>` child of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTag {
    /// The tag key, possibly colon-structured (`addr:street`).
    pub key: String,
    /// The tag value.
    pub value: String,
}

impl SubTag {
    /// Creates a sub-tag from a key/value pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One top-level element of an OSM XML document, as read from the source.
///
/// Attribute order is not significant; `node_refs` and `tags` keep
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawElement {
    /// The element name (`node`, `way`, `relation`, `bounds`, ...).
    pub name: String,
    /// The element's own attributes.
    pub attributes: BTreeMap<String, String>,
    /// `ref` values of `<nd>` children, in document order.
    pub node_refs: Vec<String>,
    /// `<tag>` children, in document order.
    pub tags: Vec<SubTag>,
}

impl RawElement {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper that sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style helper that appends a `<tag>` child.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(SubTag::new(key, value));
        self
    }

    /// Builder-style helper that appends an `<nd>` reference.
    #[must_use]
    pub fn with_node_ref(mut self, node_ref: impl Into<String>) -> Self {
        self.node_refs.push(node_ref.into());
        self
    }

    /// Returns the element kind, or `None` for elements that are not
    /// shaped (relations, bounds, ...).
    #[must_use]
    pub fn kind(&self) -> Option<ElementKind> {
        ElementKind::from_str(&self.name).ok()
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A cleaned, nested document ready to be written as one JSON line.
///
/// Attributes and simple sub-tags that are not otherwise claimed land in
/// `fields` and are flattened into the top level when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapedDocument {
    /// Provenance attributes that were present on the element.
    pub created: BTreeMap<String, String>,
    /// `[lat, lon]`, present only when both coordinates parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,
    /// Way node references, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_refs: Vec<String>,
    /// Address components keyed by the part after `addr:`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub address: BTreeMap<String, String>,
    /// A `type` value that the element carried before `type` was claimed
    /// by the element kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    /// The element kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Every other attribute and sub-tag.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl ShapedDocument {
    /// Creates an empty document for the given element kind.
    #[must_use]
    pub const fn new(kind: ElementKind) -> Self {
        Self {
            created: BTreeMap::new(),
            pos: None,
            node_refs: Vec::new(),
            address: BTreeMap::new(),
            place_type: None,
            kind,
            fields: BTreeMap::new(),
        }
    }

    /// Looks up a top-level pass-through field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_element_kinds() {
        assert_eq!(RawElement::new("node").kind(), Some(ElementKind::Node));
        assert_eq!(RawElement::new("way").kind(), Some(ElementKind::Way));
        assert_eq!(RawElement::new("relation").kind(), None);
        assert_eq!(RawElement::new("Node").kind(), None);
    }

    #[test]
    fn element_kind_displays_lowercase() {
        assert_eq!(ElementKind::Node.to_string(), "node");
        assert_eq!(ElementKind::Way.as_ref(), "way");
    }

    #[test]
    fn serializes_document_with_flattened_fields() {
        let mut doc = ShapedDocument::new(ElementKind::Node);
        doc.created.insert("uid".to_string(), "42".to_string());
        doc.pos = Some([38.9, -77.0]);
        doc.fields.insert("id".to_string(), "1".to_string());
        doc.fields.insert("amenity".to_string(), "cafe".to_string());

        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["type"], "node");
        assert_eq!(value["id"], "1");
        assert_eq!(value["amenity"], "cafe");
        assert_eq!(value["created"]["uid"], "42");
        assert_eq!(value["pos"][0], 38.9);
        assert_eq!(value["pos"][1], -77.0);
        assert!(value.get("node_refs").is_none());
        assert!(value.get("address").is_none());
        assert!(value.get("place_type").is_none());
    }

    #[test]
    fn always_serializes_created() {
        let doc = ShapedDocument::new(ElementKind::Way);
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["created"].as_object().unwrap().is_empty());
    }

    #[test]
    fn builder_keeps_tag_and_ref_order() {
        let element = RawElement::new("way")
            .with_node_ref("3")
            .with_node_ref("1")
            .with_tag("b", "2")
            .with_tag("a", "1");

        assert_eq!(element.node_refs, vec!["3", "1"]);
        assert_eq!(element.tags[0], SubTag::new("b", "2"));
        assert_eq!(element.tags[1], SubTag::new("a", "1"));
    }
}
