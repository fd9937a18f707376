//! Bundled license text lookup.
//!
//! The GPLv3 overview and full text ship as plain files under
//! `resources/text/`. They are resolved at runtime, first next to the
//! executable (installed layout), then from the crate directory
//! (development and test runs). A missing file is a `MissingResource`
//! error, not a panic.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{PdfToolError, Result};

const LICENSE_FILE: &str = "LICENSE";
const FULL_LICENSE_FILE: &str = "LICENSE_FULL";

/// The license overview text.
pub fn license_text() -> Result<String> {
    read_resource(LICENSE_FILE)
}

/// The complete license text.
pub fn full_license_text() -> Result<String> {
    read_resource(FULL_LICENSE_FILE)
}

fn read_resource(name: &str) -> Result<String> {
    for dir in resource_dirs() {
        let path = dir.join(name);
        if path.is_file() {
            return fs::read_to_string(path).map_err(PdfToolError::Io);
        }
    }
    Err(PdfToolError::MissingResource(format!(
        "resources/text/{name}"
    )))
}

fn resource_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(exe) = env::current_exe() {
        if let Some(parent) = exe.parent() {
            dirs.push(parent.join("resources/text"));
        }
    }
    dirs.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/text"));
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_texts_are_present() {
        let overview = license_text().unwrap();
        assert!(overview.contains("GNU General Public License"));

        let full = full_license_text().unwrap();
        assert!(full.contains("GNU GENERAL PUBLIC LICENSE"));
        assert!(full.len() > overview.len());
    }

    #[test]
    fn test_missing_resource_error() {
        let err = read_resource("NO_SUCH_FILE").unwrap_err();
        assert!(matches!(err, PdfToolError::MissingResource(_)));
    }
}
