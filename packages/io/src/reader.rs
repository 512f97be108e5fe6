//! Streaming OSM XML reader.
//!
//! Walks the document forward-only with `quick-xml` and yields one
//! [`RawElement`] per direct child of the root (`<osm>`), carrying its
//! attributes, `<nd ref>` references and `<tag k v>` pairs in document
//! order. Only one element is held in memory at a time.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use osm_clean_element_models::{RawElement, SubTag};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Errors from reading an OSM XML document. All are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The map file does not exist.
    #[error("map file not found: {0}")]
    FileNotFound(String),

    /// I/O error opening the map file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Xml {
        /// Byte offset where the reader stopped.
        position: u64,
        /// Parser error description.
        message: String,
    },

    /// An `<nd>` or `<tag>` child lacks an attribute it cannot do without.
    #[error("<{element}> at byte {position} is missing attribute {attribute:?}")]
    MissingAttribute {
        /// Child element name.
        element: &'static str,
        /// Missing attribute name.
        attribute: &'static str,
        /// Byte offset of the child.
        position: u64,
    },

    /// The document ended while elements were still open.
    #[error("unexpected end of document with {open} unclosed element(s)")]
    UnexpectedEof {
        /// Number of elements left open.
        open: usize,
    },
}

/// A start or empty tag with its name and attributes decoded.
struct OpenedTag {
    name: String,
    attributes: BTreeMap<String, String>,
}

enum Step {
    Open(OpenedTag),
    Empty(OpenedTag),
    Close,
    Eof,
}

/// Forward-only iterator over the top-level elements of an OSM document.
///
/// After the first error the iterator is exhausted.
pub struct OsmReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    current: Option<RawElement>,
    finished: bool,
}

impl OsmReader<BufReader<File>> {
    /// Opens a map file for streaming.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ReadError> {
        if !path.exists() {
            return Err(ReadError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> OsmReader<R> {
    /// Wraps any buffered source.
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            depth: 0,
            current: None,
            finished: false,
        }
    }

    /// Number of input bytes consumed so far.
    pub fn byte_position(&self) -> u64 {
        position(&self.reader)
    }

    fn next_element(&mut self) -> Result<Option<RawElement>, ReadError> {
        loop {
            self.buf.clear();
            let step = match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => Step::Open(open_tag(&e, &self.reader)?),
                Ok(Event::Empty(e)) => Step::Empty(open_tag(&e, &self.reader)?),
                Ok(Event::End(_)) => Step::Close,
                Ok(Event::Eof) => Step::Eof,
                Ok(_) => continue,
                Err(e) => return Err(xml_error(&self.reader, e)),
            };

            match step {
                Step::Open(tag) => {
                    let level = self.depth;
                    self.depth += 1;
                    match level {
                        0 => log::debug!("Reading <{}> document", tag.name),
                        1 => self.current = Some(raw_element(tag)),
                        _ => self.add_child(level, tag)?,
                    }
                }
                Step::Empty(tag) => match self.depth {
                    0 => log::debug!("Document root <{}> is empty", tag.name),
                    1 => return Ok(Some(raw_element(tag))),
                    level => self.add_child(level, tag)?,
                },
                Step::Close => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 1
                        && let Some(element) = self.current.take()
                    {
                        return Ok(Some(element));
                    }
                }
                Step::Eof => {
                    if self.depth > 0 {
                        return Err(ReadError::UnexpectedEof { open: self.depth });
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// Records an `<nd>` or `<tag>` child of the current element. Anything
    /// else, and anything nested deeper, is skipped.
    fn add_child(&mut self, level: usize, tag: OpenedTag) -> Result<(), ReadError> {
        if level != 2 {
            return Ok(());
        }
        let position = self.byte_position();
        let Some(element) = self.current.as_mut() else {
            return Ok(());
        };
        let mut attributes = tag.attributes;

        match tag.name.as_str() {
            "nd" => {
                let node_ref = take_required(&mut attributes, "nd", "ref", position)?;
                element.node_refs.push(node_ref);
            }
            "tag" => {
                let key = take_required(&mut attributes, "tag", "k", position)?;
                let value = take_required(&mut attributes, "tag", "v", position)?;
                element.tags.push(SubTag { key, value });
            }
            other => log::trace!("Skipping <{other}> child of <{}>", element.name),
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for OsmReader<R> {
    type Item = Result<RawElement, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_element() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Calls `on_tag` with the name of every start and empty element in the
/// document, at any depth, in document order.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML.
pub fn scan_tag_names<R: BufRead>(
    source: R,
    mut on_tag: impl FnMut(&str),
) -> Result<(), ReadError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                on_tag(&String::from_utf8_lossy(e.name().as_ref()));
            }
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(xml_error(&reader, e)),
        }
    }
}

fn position<R>(reader: &Reader<R>) -> u64 {
    reader.buffer_position().try_into().unwrap_or(u64::MAX)
}

fn xml_error<R>(reader: &Reader<R>, e: impl std::fmt::Display) -> ReadError {
    ReadError::Xml {
        position: position(reader),
        message: e.to_string(),
    }
}

fn open_tag<R>(e: &BytesStart<'_>, reader: &Reader<R>) -> Result<OpenedTag, ReadError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(reader, err))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_error(reader, err))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(OpenedTag { name, attributes })
}

fn raw_element(tag: OpenedTag) -> RawElement {
    RawElement {
        name: tag.name,
        attributes: tag.attributes,
        node_refs: Vec::new(),
        tags: Vec::new(),
    }
}

fn take_required(
    attributes: &mut BTreeMap<String, String>,
    element: &'static str,
    attribute: &'static str,
    position: u64,
) -> Result<String, ReadError> {
    attributes
        .remove(attribute)
        .ok_or(ReadError::MissingAttribute {
            element,
            attribute,
            position,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="CGImap 0.0.2">
 <bounds minlat="38.79" minlon="-77.12" maxlat="38.99" maxlon="-76.90"/>
 <node id="261114295" lat="38.9" lon="-77.0" version="7" user="bbmiller" uid="451048"/>
 <node id="261114296" lat="38.91" lon="-77.01">
  <tag k="addr:street" v="Main St"/>
  <tag k="name" v="Tom &amp; Jerry's"/>
 </node>
 <way id="8133608" version="2">
  <nd ref="261114295"/>
  <nd ref="261114296"/>
  <tag k="highway" v="residential"/>
 </way>
 <relation id="1">
  <member type="way" ref="8133608" role="outer"/>
  <tag k="type" v="multipolygon"/>
 </relation>
</osm>
"#;

    fn read_all(xml: &str) -> Vec<Result<RawElement, ReadError>> {
        OsmReader::new(Cursor::new(xml)).collect()
    }

    #[test]
    fn yields_top_level_elements_in_order() {
        let elements: Vec<RawElement> = read_all(SAMPLE).into_iter().map(Result::unwrap).collect();
        let names: Vec<&str> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bounds", "node", "node", "way", "relation"]);
    }

    #[test]
    fn reads_attributes_and_tags() {
        let elements: Vec<RawElement> = read_all(SAMPLE).into_iter().map(Result::unwrap).collect();

        let first = &elements[1];
        assert_eq!(first.attribute("id"), Some("261114295"));
        assert_eq!(first.attribute("uid"), Some("451048"));
        assert!(first.tags.is_empty());

        let second = &elements[2];
        assert_eq!(second.tags.len(), 2);
        assert_eq!(second.tags[0], SubTag::new("addr:street", "Main St"));
        assert_eq!(second.tags[1], SubTag::new("name", "Tom & Jerry's"));
    }

    #[test]
    fn reads_node_refs_in_order() {
        let elements: Vec<RawElement> = read_all(SAMPLE).into_iter().map(Result::unwrap).collect();
        let way = &elements[3];
        assert_eq!(way.node_refs, vec!["261114295", "261114296"]);
        assert_eq!(way.tags, vec![SubTag::new("highway", "residential")]);
    }

    #[test]
    fn skips_relation_members() {
        let elements: Vec<RawElement> = read_all(SAMPLE).into_iter().map(Result::unwrap).collect();
        let relation = &elements[4];
        assert!(relation.node_refs.is_empty());
        assert_eq!(relation.tags, vec![SubTag::new("type", "multipolygon")]);
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(read_all("<osm/>").is_empty());
        assert!(read_all("<osm></osm>").is_empty());
    }

    #[test]
    fn tag_without_key_is_an_error() {
        let results = read_all(r#"<osm><node id="1"><tag v="x"/></node></osm>"#);
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(ReadError::MissingAttribute {
                element: "tag",
                attribute: "k",
                ..
            })
        ));
    }

    #[test]
    fn truncated_document_is_an_error() {
        let results = read_all(r#"<osm><node id="1">"#);
        assert!(matches!(results.last(), Some(Err(_))));
    }

    #[test]
    fn stops_after_first_error() {
        let mut reader = OsmReader::new(Cursor::new(
            r#"<osm><node id="1"><nd/></node><node id="2"/></osm>"#,
        ));
        assert!(matches!(
            reader.next(),
            Some(Err(ReadError::MissingAttribute { element: "nd", .. }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn reports_position() {
        let mut reader = OsmReader::new(Cursor::new(SAMPLE));
        assert_eq!(reader.byte_position(), 0);
        reader.next();
        assert!(reader.byte_position() > 0);
    }

    #[test]
    fn scans_every_tag_name() {
        let mut names = Vec::new();
        scan_tag_names(Cursor::new(SAMPLE), |name| names.push(name.to_string())).unwrap();
        assert_eq!(names.iter().filter(|n| *n == "tag").count(), 4);
        assert_eq!(names.iter().filter(|n| *n == "nd").count(), 2);
        assert_eq!(names.iter().filter(|n| *n == "member").count(), 1);
        assert_eq!(names.first().map(String::as_str), Some("osm"));
    }
}
