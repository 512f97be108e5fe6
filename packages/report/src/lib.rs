#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Diagnostic reports over OSM map files.
//!
//! None of these reports feed the shaping pipeline. They exist to inspect a
//! map before cleaning it:
//!
//! - [`audit`]: street names grouped by unexpected trailing token
//! - [`tags`]: element-name frequencies
//! - [`keys`]: tag keys bucketed by character class
//! - [`users`]: distinct contributing user ids

pub mod audit;
pub mod keys;
pub mod tags;
pub mod users;

pub use audit::{AuditReport, audit};
pub use keys::KeyTypeCounts;
pub use tags::{TagCounts, count_tags};
pub use users::UserSet;
