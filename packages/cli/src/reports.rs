//! Streaming runners for the diagnostic reports.
//!
//! Each report reads the map once, element by element, so memory stays
//! bounded by the report itself rather than the map size.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use osm_clean_io::{OsmReader, ReadError};
use osm_clean_report::{AuditReport, KeyTypeCounts, TagCounts, UserSet, count_tags};
use osm_clean_street::TokenTable;

/// Audits the `addr:street` names of every element from `reader`.
///
/// # Errors
///
/// Returns the first read error.
pub fn audit_elements<R: BufRead>(
    reader: OsmReader<R>,
    suffixes: &TokenTable,
) -> Result<AuditReport, ReadError> {
    let mut report = AuditReport::default();
    for element in reader {
        report.record(&element?, suffixes);
    }
    Ok(report)
}

/// Counts tag keys by category for every element from `reader`.
///
/// # Errors
///
/// Returns the first read error.
pub fn key_types_elements<R: BufRead>(reader: OsmReader<R>) -> Result<KeyTypeCounts, ReadError> {
    let mut counts = KeyTypeCounts::default();
    for element in reader {
        counts.record(&element?);
    }
    Ok(counts)
}

/// Collects distinct `uid` values from every element from `reader`.
///
/// # Errors
///
/// Returns the first read error.
pub fn users_elements<R: BufRead>(reader: OsmReader<R>) -> Result<UserSet, ReadError> {
    let mut users = UserSet::default();
    for element in reader {
        users.record(&element?);
    }
    Ok(users)
}

/// Audits the street names of the map at `input`.
///
/// # Errors
///
/// Returns an error if the map cannot be opened or parsed.
pub fn audit_map(input: &Path, suffixes: &TokenTable) -> Result<AuditReport, ReadError> {
    let report = audit_elements(OsmReader::open(input)?, suffixes)?;
    log::info!(
        "Found {} unexpected street types in {}",
        report.len(),
        input.display()
    );
    Ok(report)
}

/// Counts tag keys by category in the map at `input`.
///
/// # Errors
///
/// Returns an error if the map cannot be opened or parsed.
pub fn key_types_map(input: &Path) -> Result<KeyTypeCounts, ReadError> {
    key_types_elements(OsmReader::open(input)?)
}

/// Collects distinct contributing users in the map at `input`.
///
/// # Errors
///
/// Returns an error if the map cannot be opened or parsed.
pub fn users_map(input: &Path) -> Result<UserSet, ReadError> {
    let users = users_elements(OsmReader::open(input)?)?;
    log::info!("Found {} distinct users in {}", users.len(), input.display());
    Ok(users)
}

/// Counts element names at any depth in the map at `input`.
///
/// # Errors
///
/// Returns an error if the map cannot be opened or parsed.
pub fn tags_map(input: &Path) -> Result<TagCounts, ReadError> {
    if !input.exists() {
        return Err(ReadError::FileNotFound(input.display().to_string()));
    }
    let file = File::open(input)?;
    count_tags(BufReader::new(file))
}
