#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shapes raw OSM elements into nested JSON-ready documents.
//!
//! Provenance attributes move under `created`, coordinates become a
//! `[lat, lon]` pair, `nd` references become `node_refs`, and `addr:*`
//! tags are gathered into an `address` object with the street name
//! rewritten to its canonical form. Everything else is copied through at
//! the top level.

pub mod keys;

use osm_clean_element_models::{
    ElementKind, PROVENANCE_KEYS, RESERVED_KEYS, RawElement, ShapedDocument,
};
use osm_clean_street::{TokenTables, rewrite};

use keys::{TagRoute, route_key};

/// Errors from shaping a single element.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// A required attribute is missing.
    #[error("{kind} element is missing required attribute {field:?}")]
    MalformedElement {
        /// Kind of the element.
        kind: ElementKind,
        /// Name of the missing attribute.
        field: &'static str,
    },

    /// A coordinate is not a finite number.
    #[error("invalid {field} coordinate {value:?}")]
    CoordinateFormat {
        /// `lat` or `lon`.
        field: &'static str,
        /// The raw attribute value.
        value: String,
    },
}

/// Shapes one element.
///
/// Returns `Ok(None)` for elements that are neither `node` nor `way`. A
/// coordinate that fails to parse only drops `pos` from the document; it is
/// logged, not returned.
///
/// # Errors
///
/// Returns [`ShapeError::MalformedElement`] if a `node` or `way` has no
/// `id` attribute.
pub fn shape(
    element: &RawElement,
    tables: &TokenTables,
) -> Result<Option<ShapedDocument>, ShapeError> {
    let Some(kind) = element.kind() else {
        log::trace!("Ignoring <{}> element", element.name);
        return Ok(None);
    };

    let id = element
        .attribute("id")
        .ok_or(ShapeError::MalformedElement { kind, field: "id" })?;

    let mut doc = ShapedDocument::new(kind);

    for (key, value) in &element.attributes {
        if PROVENANCE_KEYS.contains(&key.as_str()) {
            doc.created.insert(key.clone(), value.clone());
        } else if key != "lat" && key != "lon" {
            insert_field(&mut doc, key, value);
        }
    }

    match parse_position(element) {
        Ok(pos) => doc.pos = pos,
        Err(e) => log::warn!("Dropping position of {kind} {id}: {e}"),
    }

    doc.node_refs.clone_from(&element.node_refs);

    for tag in &element.tags {
        match route_key(&tag.key) {
            TagRoute::Discard(reason) => {
                log::debug!("Discarding tag {:?} on {kind} {id}: {reason}", tag.key);
            }
            TagRoute::Address(component) => {
                let value = if component == "street" {
                    rewrite(&tag.value, tables)
                } else {
                    tag.value.clone()
                };
                doc.address.insert(component.to_string(), value);
            }
            TagRoute::Namespaced(key) | TagRoute::Plain(key) => {
                insert_field(&mut doc, key, &tag.value);
            }
        }
    }

    Ok(Some(doc))
}

/// Stores a pass-through value at the top level of the document.
///
/// `type` belongs to the element kind, so an incoming `type` is kept as
/// `place_type`. Reserved keys are never overwritten.
fn insert_field(doc: &mut ShapedDocument, key: &str, value: &str) {
    if key == "type" || key == "place_type" {
        doc.place_type = Some(value.to_string());
    } else if RESERVED_KEYS.contains(&key) {
        log::debug!("Dropping {key:?} field that collides with a reserved document key");
    } else {
        doc.fields.insert(key.to_string(), value.to_string());
    }
}

/// Parses `lat`/`lon` into a position. Returns `Ok(None)` unless both are
/// present.
fn parse_position(element: &RawElement) -> Result<Option<[f64; 2]>, ShapeError> {
    let (Some(lat), Some(lon)) = (element.attribute("lat"), element.attribute("lon")) else {
        return Ok(None);
    };

    let lat = parse_coordinate("lat", lat)?;
    let lon = parse_coordinate("lon", lon)?;
    Ok(Some([lat, lon]))
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, ShapeError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ShapeError::CoordinateFormat {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_default(element: &RawElement) -> ShapedDocument {
        shape(element, TokenTables::default_tables())
            .unwrap()
            .expect("node or way")
    }

    fn node() -> RawElement {
        RawElement::new("node").with_attribute("id", "261114295")
    }

    #[test]
    fn ignores_other_elements() {
        let relation = RawElement::new("relation").with_attribute("id", "1");
        assert!(
            shape(&relation, TokenTables::default_tables())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn requires_id() {
        let err = shape(&RawElement::new("way"), TokenTables::default_tables()).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::MalformedElement {
                kind: ElementKind::Way,
                field: "id"
            }
        ));
    }

    #[test]
    fn moves_provenance_under_created() {
        let element = node()
            .with_attribute("version", "7")
            .with_attribute("changeset", "11129782")
            .with_attribute("timestamp", "2012-03-28T18:31:23Z")
            .with_attribute("user", "bbmiller")
            .with_attribute("uid", "451048")
            .with_attribute("visible", "true");

        let doc = shape_default(&element);

        assert_eq!(doc.created.len(), 5);
        assert_eq!(doc.created["user"], "bbmiller");
        assert_eq!(doc.field("id"), Some("261114295"));
        assert_eq!(doc.field("visible"), Some("true"));
        assert_eq!(doc.field("uid"), None);
        assert_eq!(doc.kind, ElementKind::Node);
    }

    #[test]
    fn keeps_only_present_provenance() {
        let doc = shape_default(&node().with_attribute("user", "someone"));
        assert_eq!(doc.created.len(), 1);
        assert_eq!(doc.created["user"], "someone");
    }

    #[test]
    fn parses_position() {
        let doc = shape_default(&node().with_attribute("lat", "38.9").with_attribute("lon", "-77.0"));
        assert_eq!(doc.pos, Some([38.9, -77.0]));
        assert_eq!(doc.field("lat"), None);
        assert_eq!(doc.field("lon"), None);
    }

    #[test]
    fn omits_position_without_both_coordinates() {
        assert_eq!(shape_default(&node().with_attribute("lat", "38.9")).pos, None);
        assert_eq!(shape_default(&node().with_attribute("lon", "-77.0")).pos, None);
        assert_eq!(shape_default(&node()).pos, None);
    }

    #[test]
    fn omits_position_with_bad_coordinates() {
        let doc = shape_default(&node().with_attribute("lat", "north").with_attribute("lon", "-77.0"));
        assert_eq!(doc.pos, None);

        let doc = shape_default(&node().with_attribute("lat", "NaN").with_attribute("lon", "-77.0"));
        assert_eq!(doc.pos, None);

        let doc = shape_default(&node().with_attribute("lat", "38.9").with_attribute("lon", "inf"));
        assert_eq!(doc.pos, None);
    }

    #[test]
    fn keeps_out_of_range_coordinates_that_parse() {
        let doc = shape_default(&node().with_attribute("lat", "95.0").with_attribute("lon", "-77.0"));
        assert_eq!(doc.pos, Some([95.0, -77.0]));

        let doc = shape_default(&node().with_attribute("lat", "38.9").with_attribute("lon", "200"));
        assert_eq!(doc.pos, Some([38.9, 200.0]));
    }

    #[test]
    fn collects_node_refs_in_order() {
        let way = RawElement::new("way")
            .with_attribute("id", "5")
            .with_node_ref("30")
            .with_node_ref("10")
            .with_node_ref("20");
        let doc = shape_default(&way);
        assert_eq!(doc.node_refs, vec!["30", "10", "20"]);
        assert_eq!(doc.kind, ElementKind::Way);
    }

    #[test]
    fn rewrites_address_street() {
        let doc = shape_default(
            &node()
                .with_tag("addr:street", "123 Main St")
                .with_tag("addr:housenumber", "5157")
                .with_tag("addr:postcode", "20016"),
        );
        assert_eq!(doc.address["street"], "123 Main Street");
        assert_eq!(doc.address["housenumber"], "5157");
        assert_eq!(doc.address["postcode"], "20016");
    }

    #[test]
    fn emits_address_without_street() {
        let doc = shape_default(&node().with_tag("addr:city", "Washington"));
        assert_eq!(doc.address.len(), 1);
        assert_eq!(doc.address["city"], "Washington");
    }

    #[test]
    fn no_address_without_address_tags() {
        let doc = shape_default(&node().with_tag("amenity", "cafe"));
        assert!(doc.address.is_empty());
        assert_eq!(doc.field("amenity"), Some("cafe"));
    }

    #[test]
    fn drops_nested_namespace_tags() {
        let doc = shape_default(&node().with_tag("a:b:c", "x"));
        assert!(doc.fields.keys().all(|k| k == "id"));
        assert!(doc.address.is_empty());
    }

    #[test]
    fn drops_problem_character_tags() {
        let doc = shape_default(&node().with_tag("name.en", "x").with_tag("addr.street", "y"));
        assert_eq!(doc.field("name.en"), None);
        assert!(doc.address.is_empty());
    }

    #[test]
    fn stores_namespaced_tags_under_suffix() {
        let doc = shape_default(&node().with_tag("official:name", "X"));
        assert_eq!(doc.field("name"), Some("X"));
        assert_eq!(doc.field("official:name"), None);
    }

    #[test]
    fn preserves_type_as_place_type() {
        let doc = shape_default(&node().with_tag("type", "multipolygon"));
        assert_eq!(doc.place_type.as_deref(), Some("multipolygon"));
        assert_eq!(doc.kind, ElementKind::Node);
        assert_eq!(doc.field("type"), None);
    }

    #[test]
    fn type_attribute_becomes_place_type() {
        let doc = shape_default(&node().with_attribute("type", "x"));
        assert_eq!(doc.place_type.as_deref(), Some("x"));
        assert_eq!(doc.kind, ElementKind::Node);
        assert_eq!(doc.field("type"), None);
    }

    #[test]
    fn reserved_keys_are_not_overwritten() {
        let doc = shape_default(
            &node()
                .with_attribute("user", "someone")
                .with_tag("created", "yesterday")
                .with_tag("pos", "here"),
        );
        assert_eq!(doc.created["user"], "someone");
        assert_eq!(doc.field("created"), None);
        assert_eq!(doc.field("pos"), None);
    }

    #[test]
    fn later_tags_overwrite_earlier_ones() {
        let doc = shape_default(
            &node()
                .with_tag("name", "First")
                .with_tag("official:name", "Second"),
        );
        assert_eq!(doc.field("name"), Some("Second"));
    }
}
