#![allow(clippy::module_name_repetitions)]
//! Street suffix and direction token tables.
//!
//! Tables are declared in TOML. The Washington DC tables in
//! `packages/street/tables/dc.toml` are baked into the binary at compile
//! time via [`include_str!`] and used unless a replacement file is loaded
//! with [`TokenTables::load`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;

/// Default tables embedded at compile time.
const DEFAULT_TABLES_TOML: &str = include_str!("../tables/dc.toml");

static DEFAULT_TABLES: LazyLock<TokenTables> = LazyLock::new(|| {
    TokenTables::from_toml_str(DEFAULT_TABLES_TOML).expect("embedded token tables are valid")
});

/// Errors from loading token tables.
#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    /// The tables file could not be read.
    #[error("failed to read token tables {path}: {source}")]
    Io {
        /// Path of the tables file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The tables file is not valid TOML or has the wrong shape.
    #[error("invalid token tables: {0}")]
    Parse(#[from] toml::de::Error),

    /// An abbreviation expands to a token the table does not expect.
    #[error("{table} abbreviation {abbreviation:?} maps to {canonical:?}, which is not an expected token")]
    UnknownCanonical {
        /// Which table (`suffix` or `direction`).
        table: &'static str,
        /// The abbreviation key.
        abbreviation: String,
        /// The canonical form it maps to.
        canonical: String,
    },
}

/// One expected-token set together with its abbreviation mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenTable {
    /// Canonical tokens (`"Street"`, `"North"`).
    pub expected: BTreeSet<String>,
    /// Raw token → canonical token. Keys match exactly, case included.
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
}

impl TokenTable {
    /// Returns `true` if `token` is already a canonical token.
    #[must_use]
    pub fn is_expected(&self, token: &str) -> bool {
        self.expected.contains(token)
    }

    /// Returns the canonical form for an abbreviation.
    #[must_use]
    pub fn canonical(&self, abbreviation: &str) -> Option<&str> {
        self.abbreviations.get(abbreviation).map(String::as_str)
    }

    fn validate(&self, table: &'static str) -> Result<(), TablesError> {
        for (abbreviation, canonical) in &self.abbreviations {
            if !self.expected.contains(canonical) {
                return Err(TablesError::UnknownCanonical {
                    table,
                    abbreviation: abbreviation.clone(),
                    canonical: canonical.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The street suffix and compass direction tables used by the classifier
/// and rewriter.
///
/// Constructed once at start-up and shared by reference; never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenTables {
    /// Street type suffixes (`Street`, `Avenue`, ...).
    pub suffix: TokenTable,
    /// Compass directions (`North`, `Southeast`, ...).
    pub direction: TokenTable,
}

impl TokenTables {
    /// Returns the embedded default tables.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded TOML is invalid.
    #[must_use]
    pub fn default_tables() -> &'static Self {
        &DEFAULT_TABLES
    }

    /// Parses tables from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or an abbreviation maps to
    /// a token that is not listed in the same table's `expected` set.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, TablesError> {
        let tables: Self = toml::de::from_str(toml_str)?;
        tables.suffix.validate("suffix")?;
        tables.direction.validate("direction")?;
        Ok(tables)
    }

    /// Loads tables from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn load(path: &Path) -> Result<Self, TablesError> {
        let toml_str = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tables = Self::from_toml_str(&toml_str)?;
        log::info!(
            "Loaded token tables from {}: {} suffixes, {} directions",
            path.display(),
            tables.suffix.expected.len(),
            tables.direction.expected.len()
        );
        Ok(tables)
    }
}
