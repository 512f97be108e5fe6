//! Street-name audit.
//!
//! Groups `addr:street` values whose trailing token is not an expected
//! street suffix by that token, so abbreviations and typos can be reviewed
//! before tables are extended. No fixing or direction handling happens
//! here.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use osm_clean_element_models::RawElement;
use osm_clean_street::{TokenTable, trailing_token};
use serde::Serialize;

/// The tag key whose values are audited.
pub const STREET_KEY: &str = "addr:street";

/// Unexpected trailing token → every distinct street name that ends in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuditReport {
    street_types: BTreeMap<String, BTreeSet<String>>,
}

impl AuditReport {
    /// Audits one street name against the suffix table.
    pub fn record_street(&mut self, name: &str, suffixes: &TokenTable) {
        let Some((token, _)) = trailing_token(name.trim()) else {
            return;
        };
        if suffixes.is_expected(token) {
            return;
        }
        self.street_types
            .entry(token.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Audits every `addr:street` tag of a `node` or `way`.
    pub fn record(&mut self, element: &RawElement, suffixes: &TokenTable) {
        if element.kind().is_none() {
            return;
        }
        for tag in element.tags.iter().filter(|t| t.key == STREET_KEY) {
            self.record_street(&tag.value, suffixes);
        }
    }

    /// Street names that ended in `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.street_types.get(token)
    }

    /// Number of distinct unexpected tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.street_types.len()
    }

    /// Returns `true` if every audited name ended in an expected suffix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street_types.is_empty()
    }

    /// Iterates tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.street_types.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (token, names) in self.iter() {
            writeln!(f, "{token} ({})", names.len())?;
            for name in names {
                writeln!(f, "  {name}")?;
            }
        }
        Ok(())
    }
}

/// Audits the street names of a sequence of elements.
pub fn audit<'a>(
    elements: impl IntoIterator<Item = &'a RawElement>,
    suffixes: &TokenTable,
) -> AuditReport {
    let mut report = AuditReport::default();
    for element in elements {
        report.record(element, suffixes);
    }
    log::debug!("Audit found {} unexpected street types", report.len());
    report
}
