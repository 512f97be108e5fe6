#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! OSM XML street-name audit and JSON-lines conversion.
//!
//! The `osm_clean` binary wraps these functions in a CLI; with no
//! subcommand it falls back to an interactive menu ([`interactive`]).

pub mod interactive;
pub mod pipeline;
pub mod reports;

use std::fmt::Display;
use std::path::Path;

use osm_clean_cli_utils::{MapProgress, MultiProgress};
use osm_clean_street::{TablesError, TokenTables};
use serde::Serialize;

use pipeline::{PipelineError, ProcessOptions, ProcessSummary, process_map};

/// Loads token tables from `path`, or the built-in DC tables if `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// maps an abbreviation to a token its table does not expect.
pub fn load_tables(path: Option<&Path>) -> Result<TokenTables, TablesError> {
    path.map_or_else(|| Ok(TokenTables::default_tables().clone()), TokenTables::load)
}

/// Converts `input` to `<input>.json` with a byte progress bar.
///
/// # Errors
///
/// See [`process_map`].
pub fn run_process(
    input: &Path,
    tables: &TokenTables,
    options: ProcessOptions,
    multi: &MultiProgress,
) -> Result<ProcessSummary, PipelineError> {
    let progress = MapProgress::start(multi, "Opening map");
    let (output, summary) = process_map(input, tables, options, progress.as_ref())?;
    println!(
        "{} -> {} ({} documents)",
        input.display(),
        output.display(),
        summary.documents_written
    );
    Ok(summary)
}

/// Prints a report as plain text, or as pretty JSON when `json` is set.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_report<T: Serialize + Display>(report: &T, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
