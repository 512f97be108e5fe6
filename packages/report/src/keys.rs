//! Tag-key category counts.

use std::collections::BTreeMap;
use std::fmt;

use osm_clean_element_models::RawElement;
use osm_clean_shape::keys::{KeyType, key_type};
use serde::Serialize;

/// Number of tag keys in each [`KeyType`] category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyTypeCounts {
    counts: BTreeMap<KeyType, u64>,
}

impl Default for KeyTypeCounts {
    fn default() -> Self {
        Self {
            counts: KeyType::ALL.iter().map(|&t| (t, 0)).collect(),
        }
    }
}

impl KeyTypeCounts {
    /// Categorises every tag key of `element`.
    pub fn record(&mut self, element: &RawElement) {
        for tag in &element.tags {
            *self.counts.entry(key_type(&tag.key)).or_default() += 1;
        }
    }

    /// Count for one category.
    #[must_use]
    pub fn get(&self, key_type: KeyType) -> u64 {
        self.counts.get(&key_type).copied().unwrap_or_default()
    }
}

impl fmt::Display for KeyTypeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key_type, count) in &self.counts {
            writeln!(f, "{:<12} {count}", key_type.as_ref())?;
        }
        Ok(())
    }
}
