#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal plumbing for the `osm_clean` binary.
//!
//! [`MapProgress`] draws how far through the input map a scan has got,
//! and [`init_logger`] routes log output through the same
//! [`MultiProgress`] so the two never interleave.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use osm_clean_io::ProgressCallback;

pub use indicatif::MultiProgress;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Byte-offset progress through a map file.
///
/// Shows a spinner until the file size is known, then a bar.
pub struct MapProgress {
    bar: ProgressBar,
    sized_style: ProgressStyle,
}

impl MapProgress {
    /// Adds a map progress indicator to `multi`.
    #[must_use]
    pub fn start(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let sized_style = ProgressStyle::with_template(
            "  {msg} [{bar:40.green/dim}] {bytes}/{total_bytes} ({percent}%) {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

        Arc::new(Self { bar, sized_style })
    }
}

impl ProgressCallback for MapProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_style(self.sized_style.clone());
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Installs the global logger behind an `indicatif` bridge.
///
/// Filtering follows `RUST_LOG`, falling back to `info`. Calling this more
/// than once keeps the first logger.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let logger = pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .build();
    let max_level = logger.filter();

    if indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .is_ok()
    {
        log::set_max_level(max_level);
    }

    multi
}
