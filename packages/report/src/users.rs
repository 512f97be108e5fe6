//! Distinct contributing users.

use std::collections::BTreeSet;
use std::fmt;

use osm_clean_element_models::RawElement;
use serde::Serialize;

/// Distinct `uid` attribute values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserSet {
    uids: BTreeSet<String>,
}

impl UserSet {
    /// Adds the element's `uid`, if it has one.
    pub fn record(&mut self, element: &RawElement) {
        if let Some(uid) = element.attribute("uid") {
            self.uids.insert(uid.to_string());
        }
    }

    /// Number of distinct users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.uids.len()
    }

    /// Returns `true` if no element carried a `uid`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    /// Returns `true` if `uid` was seen.
    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.uids.contains(uid)
    }
}

impl fmt::Display for UserSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for uid in &self.uids {
            writeln!(f, "{uid}")?;
        }
        Ok(())
    }
}
