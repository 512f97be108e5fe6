//! Canonical street-name rewriting.
//!
//! A trailing compass direction is split off first, then the street suffix
//! that precedes it is expanded, and the pieces are reassembled as
//! `<name> <suffix> <direction>`:
//!
//! - `"Main St"` → `"Main Street"`
//! - `"Oak Rd NW"` → `"Oak Road Northwest"`
//! - `"Oak Road Northeast"` → `"Oak Road Northeast"`

use crate::classify::classify;
use crate::tables::TokenTables;

/// Rewrites a street name into its canonical, title-cased form.
///
/// Unknown trailing tokens are left where they are. Only exact table
/// entries are expanded; `"ST"` is not `"St"`.
#[must_use]
pub fn rewrite(name: &str, tables: &TokenTables) -> String {
    let original = name.trim();
    let mut name = original;
    let mut direction = "";

    let found = classify(name, &tables.direction);
    if found.is_valid {
        direction = &name[found.token_start..];
        name = name[..found.token_start].trim_end();
    } else if found.needs_fix
        && let Some(canonical) = tables.direction.canonical(&name[found.token_start..])
    {
        direction = canonical;
        name = name[..found.token_start].trim_end();
    }

    let found = classify(name, &tables.suffix);
    if found.is_valid {
        return join_title_case(&[name, direction]);
    }

    let mut suffix = "";
    if found.needs_fix
        && let Some(canonical) = tables.suffix.canonical(&name[found.token_start..])
    {
        suffix = canonical;
        name = name[..found.token_start].trim_end();
    }

    let rewritten = join_title_case(&[name, suffix, direction]);
    if rewritten != original {
        log::trace!("Rewrote street name {original:?} -> {rewritten:?}");
    }
    rewritten
}

/// Joins the non-empty parts with single spaces and title-cases the result.
fn join_title_case(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    title_case(&joined)
}

/// Title-cases a string.
///
/// A letter is upper-cased when it starts the string or follows a
/// non-alphanumeric character; every other letter is lower-cased. Digits
/// do not start a word, so `"1st"` stays `"1st"` where a plain
/// word-boundary title-case would give `"1St"`.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphanumeric = false;
    for c in s.chars() {
        if !c.is_alphabetic() {
            out.push(c);
        } else if prev_alphanumeric {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alphanumeric = c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rw(name: &str) -> String {
        rewrite(name, TokenTables::default_tables())
    }

    #[test]
    fn keeps_canonical_suffix() {
        assert_eq!(rw("123 Main Street"), "123 Main Street");
        assert_eq!(rw("  elm avenue "), "Elm Avenue");
    }

    #[test]
    fn canonical_suffix_is_only_trimmed_and_title_cased() {
        for name in [
            "1600 pennsylvania Avenue",
            " Connecticut Avenue ",
            "o'neil Way",
            "7th  Street",
        ] {
            assert_eq!(rw(name), title_case(name.trim()), "{name}");
        }
    }

    #[test]
    fn expands_suffix_abbreviations() {
        assert_eq!(rw("Main St"), "Main Street");
        assert_eq!(rw("123 Main St."), "123 Main Street");
        assert_eq!(rw("Wisconsin ave"), "Wisconsin Avenue");
        assert_eq!(rw("Rock Creek Pkwy"), "Rock Creek Parkway");
    }

    #[test]
    fn expands_direction_after_suffix() {
        assert_eq!(rw("Oak Rd NW"), "Oak Road Northwest");
        assert_eq!(rw("Pennsylvania Ave. S.E."), "Pennsylvania Avenue Southeast");
        assert_eq!(rw("K St n"), "K Street North");
    }

    #[test]
    fn strips_direction_before_suffix() {
        assert_eq!(rw("Oak Road Northeast"), "Oak Road Northeast");
        assert_eq!(rw("Oak Road NE"), "Oak Road Northeast");
    }

    #[test]
    fn direction_without_suffix() {
        assert_eq!(rw("Broadway NW"), "Broadway Northwest");
        assert_eq!(rw("N"), "North");
    }

    #[test]
    fn passes_unknown_tokens_through() {
        assert_eq!(rw("Main Xyz"), "Main Xyz");
        assert_eq!(rw("Main ST"), "Main St");
        assert_eq!(rw("Main RD NW"), "Main Rd Northwest");
    }

    #[test]
    fn empty_name_stays_empty() {
        assert_eq!(rw(""), "");
        assert_eq!(rw("   "), "");
    }

    #[test]
    fn rewrite_is_idempotent_on_canonical_output() {
        for name in [
            "Main St",
            "Oak Rd NW",
            "Pennsylvania Ave. S.E.",
            "Oak Road Northeast",
            "Broadway NW",
            "12 Rock Creek Pkwy",
        ] {
            let once = rw(name);
            assert_eq!(rw(&once), once, "{name}");
        }
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("MAIN STREET"), "Main Street");
        assert_eq!(title_case("1st street"), "1st Street");
        assert_eq!(rw("1st St NW"), "1st Street Northwest");
        assert_eq!(title_case("north-west o'neil"), "North-West O'Neil");
    }
}
