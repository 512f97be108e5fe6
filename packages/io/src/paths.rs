//! Output file naming.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension appended to an input map path to name its JSON-lines output.
pub const OUTPUT_EXTENSION: &str = "json";

/// Returns the JSON-lines output path for an input map file.
///
/// The extension is appended rather than replaced, so `dc.osm` becomes
/// `dc.osm.json`.
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_json_extension() {
        assert_eq!(
            output_path_for(Path::new("data/washdc.osm")),
            PathBuf::from("data/washdc.osm.json")
        );
    }

    #[test]
    fn handles_paths_without_extension() {
        assert_eq!(output_path_for(Path::new("sample")), PathBuf::from("sample.json"));
    }
}
