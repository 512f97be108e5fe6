//! Map-to-JSON-lines conversion.
//!
//! Streams elements out of an OSM XML file, shapes each `node` and `way`
//! and appends the resulting documents to `<input>.json`, in input order.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use osm_clean_io::{
    JsonLinesWriter, OsmReader, ProgressCallback, ReadError, WriteError, output_path_for,
};
use osm_clean_shape::{ShapeError, shape};
use osm_clean_street::TokenTables;
use serde::Serialize;

/// How often (in elements) the progress position is refreshed.
const PROGRESS_INTERVAL: u64 = 1000;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The map could not be read.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A document could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// An element could not be shaped and skipping was not requested.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for a conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Indent each document.
    pub pretty: bool,
    /// Skip malformed elements with a warning instead of aborting.
    pub skip_malformed: bool,
}

/// Counts from a finished conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    /// Top-level elements read from the map.
    pub elements_read: u64,
    /// Documents written.
    pub documents_written: u64,
    /// Elements that are neither `node` nor `way`.
    pub elements_ignored: u64,
    /// Malformed elements skipped.
    pub elements_skipped: u64,
}

/// Shapes every element from `reader` and writes the documents to
/// `writer`.
///
/// # Errors
///
/// Returns an error on the first read or write failure, or on the first
/// malformed element unless [`ProcessOptions::skip_malformed`] is set.
pub fn process_elements<R: BufRead, W: Write>(
    mut reader: OsmReader<R>,
    writer: &mut JsonLinesWriter<W>,
    tables: &TokenTables,
    options: ProcessOptions,
    progress: &dyn ProgressCallback,
) -> Result<ProcessSummary, PipelineError> {
    let mut summary = ProcessSummary::default();

    while let Some(element) = reader.next() {
        let element = element?;
        summary.elements_read += 1;

        match shape(&element, tables) {
            Ok(Some(doc)) => {
                writer.write(&doc)?;
                summary.documents_written += 1;
            }
            Ok(None) => summary.elements_ignored += 1,
            Err(e) if options.skip_malformed => {
                log::warn!("Skipping element #{}: {e}", summary.elements_read);
                summary.elements_skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }

        if summary.elements_read % PROGRESS_INTERVAL == 0 {
            progress.set_position(reader.byte_position());
        }
    }

    progress.set_position(reader.byte_position());
    Ok(summary)
}

/// Converts the map at `input` into `<input>.json`.
///
/// Returns the output path and the run summary.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the output cannot be
/// written, or an element is malformed and skipping was not requested.
pub fn process_map(
    input: &Path,
    tables: &TokenTables,
    options: ProcessOptions,
    progress: &dyn ProgressCallback,
) -> Result<(PathBuf, ProcessSummary), PipelineError> {
    let output = output_path_for(input);
    let reader = OsmReader::open(input)?;
    progress.set_total(std::fs::metadata(input)?.len());
    progress.set_message(format!("Shaping {}", input.display()));

    let mut writer = JsonLinesWriter::create(&output, options.pretty)?;
    let summary = process_elements(reader, &mut writer, tables, options, progress)?;
    writer.finish()?;

    progress.finish(format!("{} documents", summary.documents_written));
    log::info!(
        "Wrote {} documents to {} ({} elements read, {} ignored, {} skipped)",
        summary.documents_written,
        output.display(),
        summary.elements_read,
        summary.elements_ignored,
        summary.elements_skipped
    );

    Ok((output, summary))
}
