//! Element-name frequency counts.

use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;

use osm_clean_io::{ReadError, scan_tag_names};
use serde::Serialize;

/// How many times each element name occurs anywhere in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagCounts {
    counts: BTreeMap<String, u64>,
}

impl TagCounts {
    /// Counts one occurrence of `name`.
    pub fn record(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_default() += 1;
    }

    /// Occurrences of `name`, zero if never seen.
    #[must_use]
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or_default()
    }

    /// Iterates names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl fmt::Display for TagCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in self.iter() {
            writeln!(f, "{name:<12} {count}")?;
        }
        Ok(())
    }
}

/// Counts every element name in an XML document.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML.
pub fn count_tags<R: BufRead>(source: R) -> Result<TagCounts, ReadError> {
    let mut counts = TagCounts::default();
    scan_tag_names(source, |name| counts.record(name))?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn counts_all_depths() {
        let xml = r#"<osm>
            <bounds/>
            <node id="1"><tag k="a" v="b"/></node>
            <node id="2"/>
            <way id="3"><nd ref="1"/><nd ref="2"/><tag k="c" v="d"/></way>
        </osm>"#;
        let counts = count_tags(Cursor::new(xml)).unwrap();

        assert_eq!(counts.get("osm"), 1);
        assert_eq!(counts.get("bounds"), 1);
        assert_eq!(counts.get("node"), 2);
        assert_eq!(counts.get("way"), 1);
        assert_eq!(counts.get("nd"), 2);
        assert_eq!(counts.get("tag"), 2);
        assert_eq!(counts.get("relation"), 0);
    }

    #[test]
    fn fails_on_malformed_xml() {
        assert!(count_tags(Cursor::new("<osm><node></way></osm>")).is_err());
    }
}
