//! Output-path derivation and filename conventions.
//!
//! Suffixes are inserted before the `.pdf` extension: `report.pdf` becomes
//! `report_shrunken.pdf` or `report_watermarked.pdf`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Marker inserted into watermarked output filenames. Files whose stem
/// already contains it are skipped on later runs.
pub const WATERMARKED_MARKER: &str = "_watermarked";

/// Suffix for shrunken output filenames.
pub const SHRUNKEN_SUFFIX: &str = "_shrunken";

/// Suffix for the transient one-page overlay PDF.
pub const TEMP_OVERLAY_SUFFIX: &str = "_temp";

/// Return `path` with `suffix` appended to the file stem, keeping the
/// extension: `dir/report.pdf` + `_shrunken` -> `dir/report_shrunken.pdf`.
pub fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Check whether a path has a `.pdf` extension (case-insensitive).
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Heuristic "already processed" check: the file stem contains the
/// watermarked marker. String containment on filenames, so a file that
/// legitimately carries the substring is skipped too.
pub fn is_already_watermarked(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().contains(WATERMARKED_MARKER))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_suffix_keeps_extension() {
        let out = with_stem_suffix(Path::new("/tmp/report.pdf"), SHRUNKEN_SUFFIX);
        assert_eq!(out, PathBuf::from("/tmp/report_shrunken.pdf"));
    }

    #[test]
    fn test_stem_suffix_without_extension() {
        let out = with_stem_suffix(Path::new("report"), TEMP_OVERLAY_SUFFIX);
        assert_eq!(out, PathBuf::from("report_temp"));
    }

    #[test]
    fn test_stem_suffix_keeps_directory() {
        let out = with_stem_suffix(Path::new("a/b/notes.pdf"), WATERMARKED_MARKER);
        assert_eq!(out, PathBuf::from("a/b/notes_watermarked.pdf"));
    }

    #[test]
    fn test_is_pdf_case_insensitive() {
        assert!(is_pdf(Path::new("x.pdf")));
        assert!(is_pdf(Path::new("x.PDF")));
        assert!(!is_pdf(Path::new("x.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_marker_detection() {
        assert!(is_already_watermarked(Path::new("report_watermarked.pdf")));
        assert!(!is_already_watermarked(Path::new("report.pdf")));
        // Known limitation: containment, not an exact suffix match.
        assert!(is_already_watermarked(Path::new(
            "report_watermarked_final.pdf"
        )));
    }
}
