//! JSON-lines document writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Errors from writing documents.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes one JSON document per line.
///
/// In pretty mode each document is indented with two spaces and still
/// terminated by a single newline.
pub struct JsonLinesWriter<W: Write> {
    inner: W,
    pretty: bool,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Creates (or truncates) `path` and returns a buffered writer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path, pretty: bool) -> Result<Self, WriteError> {
        let file = File::create(path)?;
        log::info!("Writing documents to {}", path.display());
        Ok(Self::new(BufWriter::new(file), pretty))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    /// Wraps any writer.
    pub const fn new(inner: W, pretty: bool) -> Self {
        Self {
            inner,
            pretty,
        }
    }

    /// Serializes `doc` and appends it as one line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write<T: Serialize>(&mut self, doc: &T) -> Result<(), WriteError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.inner, doc)?;
        } else {
            serde_json::to_writer(&mut self.inner, doc)?;
        }
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<W, WriteError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
