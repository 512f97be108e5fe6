#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input and output plumbing for the OSM cleaning toolchain.
//!
//! - [`reader`]: streams top-level elements out of an OSM XML file.
//! - [`writer`]: appends shaped documents to a JSON-lines file.
//! - [`paths`]: derives the output path from the input path.
//! - [`progress`]: backend-agnostic progress reporting.

pub mod paths;
pub mod progress;
pub mod reader;
pub mod writer;

pub use paths::output_path_for;
pub use progress::{NullProgress, ProgressCallback};
pub use reader::{OsmReader, ReadError, scan_tag_names};
pub use writer::{JsonLinesWriter, WriteError};
