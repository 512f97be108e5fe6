#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street-name normalization for OSM address tags.
//!
//! # Architecture
//!
//! - [`tables`]: immutable suffix and direction token tables, loaded from
//!   TOML once at start-up.
//! - [`classify`]: finds a name's trailing token and checks it against one
//!   table.
//! - [`rewrite`]: strips and expands a trailing direction, then the street
//!   suffix before it, and reassembles a title-cased name.
//!
//! # Usage
//!
//! ```rust
//! use osm_clean_street::{TokenTables, rewrite};
//!
//! let tables = TokenTables::default_tables();
//! assert_eq!(rewrite("Oak Rd NW", tables), "Oak Road Northwest");
//! ```

pub mod classify;
pub mod rewrite;
pub mod tables;

pub use classify::{Classification, classify, trailing_token};
pub use rewrite::{rewrite, title_case};
pub use tables::{TablesError, TokenTable, TokenTables};
