//! Tag-key classification.
//!
//! Decides where each `<tag k=".."/>` of an element ends up in the shaped
//! document, and buckets keys into the coarse categories reported by the
//! `keys` report.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// Characters that make a tag key unusable as a document key.
static PROBLEM_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=+/&<>;'"?%#$@,. \t\r\n]"#).expect("valid regex"));

/// Keys with two or more namespace separators (`a:b:c`).
static NESTED_NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+:\w+:\w+").expect("valid regex"));

/// Keys with a namespace separator (`official:name`).
static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+:\w+").expect("valid regex"));

/// The word run after the first usable separator.
static NAMESPACE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\w+)").expect("valid regex"));

static LOWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]*$").expect("valid regex"));

static LOWER_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]*:[a-z_]*$").expect("valid regex"));

/// Length of the `addr:` prefix stripped from address keys.
const ADDRESS_PREFIX_CHARS: usize = 5;

/// Why a tag was dropped from the shaped document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DiscardReason {
    /// The key contains a problem character.
    #[strum(serialize = "problem characters")]
    ProblemCharacters,
    /// The key has more than one namespace separator.
    #[strum(serialize = "nested namespace")]
    NestedNamespace,
}

/// Destination of a tag within the shaped document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRoute<'a> {
    /// Drop the tag.
    Discard(DiscardReason),
    /// Store under `address[component]`.
    Address(&'a str),
    /// Store at the top level under the namespace suffix.
    Namespaced(&'a str),
    /// Store at the top level under the full key.
    Plain(&'a str),
}

/// Routes a tag key. Rules are checked in order and the first match wins:
///
/// 1. problem characters → discard
/// 2. `word:word:word` anywhere in the key → discard
/// 3. contains `addr` → address component (key minus its first five
///    characters)
/// 4. `word:word` anywhere in the key → the word after the first colon
/// 5. anything else → the full key
#[must_use]
pub fn route_key(key: &str) -> TagRoute<'_> {
    if PROBLEM_CHARS_RE.is_match(key) {
        return TagRoute::Discard(DiscardReason::ProblemCharacters);
    }
    if NESTED_NAMESPACE_RE.is_match(key) {
        return TagRoute::Discard(DiscardReason::NestedNamespace);
    }
    if key.contains("addr") {
        let component = key
            .char_indices()
            .nth(ADDRESS_PREFIX_CHARS)
            .map_or("", |(i, _)| &key[i..]);
        return TagRoute::Address(component);
    }
    if NAMESPACE_RE.is_match(key)
        && let Some(caps) = NAMESPACE_SUFFIX_RE.captures(key)
        && let Some(suffix) = caps.get(1)
    {
        return TagRoute::Namespaced(suffix.as_str());
    }
    TagRoute::Plain(key)
}

/// Coarse category of a tag key.
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
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyType {
    /// Only lowercase ASCII letters and underscores.
    Lower,
    /// Two `Lower` segments joined by one colon.
    LowerColon,
    /// Contains a problem character.
    #[serde(rename = "problemchars")]
    #[strum(serialize = "problemchars")]
    ProblemChars,
    /// Anything else.
    Other,
}

impl KeyType {
    /// All categories in reporting order.
    pub const ALL: &[Self] = &[
        Self::Lower,
        Self::LowerColon,
        Self::ProblemChars,
        Self::Other,
    ];
}

/// Categorises a tag key. Categories are checked in [`KeyType::ALL`] order.
#[must_use]
pub fn key_type(key: &str) -> KeyType {
    if LOWER_RE.is_match(key) {
        KeyType::Lower
    } else if LOWER_COLON_RE.is_match(key) {
        KeyType::LowerColon
    } else if PROBLEM_CHARS_RE.is_match(key) {
        KeyType::ProblemChars
    } else {
        KeyType::Other
    }
}
