//! Trailing-token classification.
//!
//! A street name's trailing token is the last whitespace-delimited run of
//! the trimmed name, starting at the first word boundary inside that run.
//! `"Main St."` yields `"St."`, `"Route (9)"` yields `"9)"`, and a run with
//! no word characters at all (`"Main -"`) yields nothing.

use crate::tables::TokenTable;

/// Outcome of matching a name's trailing token against one [`TokenTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    /// The token is one of the table's canonical tokens.
    pub is_valid: bool,
    /// The token is an abbreviation with a known canonical form.
    pub needs_fix: bool,
    /// Byte offset of the token within the trimmed name. `0` when no token
    /// was found.
    pub token_start: usize,
}

/// Word characters for boundary detection: Unicode alphanumerics and `_`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds the trailing token of `name` and its byte offset.
///
/// `name` is used as given; callers that want the offset to line up with a
/// trimmed string must trim first. Returns `None` when `name` ends in
/// whitespace, is empty, or its trailing run contains no word character.
#[must_use]
pub fn trailing_token(name: &str) -> Option<(&str, usize)> {
    let run_start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_whitespace())
        .last()
        .map(|(i, _)| i)?;
    let run = &name[run_start..];

    // The run is preceded by whitespace or the start of the string, so a
    // boundary exists wherever word-ness first flips.
    let mut prev_word = false;
    for (offset, c) in run.char_indices() {
        let word = is_word_char(c);
        if word != prev_word {
            return Some((&run[offset..], run_start + offset));
        }
        prev_word = word;
    }

    None
}

/// Classifies the trailing token of `name` against `table`.
///
/// Lookups are exact and case-sensitive: `"st"` and `"St"` are only
/// recognised if the table lists that exact spelling.
#[must_use]
pub fn classify(name: &str, table: &TokenTable) -> Classification {
    let Some((token, token_start)) = trailing_token(name.trim()) else {
        return Classification::default();
    };

    Classification {
        is_valid: table.is_expected(token),
        needs_fix: table.canonical(token).is_some(),
        token_start,
    }
}
