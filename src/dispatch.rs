//! File-vs-folder target resolution.
//!
//! Both operations accept either a single PDF file or a folder. Folders are
//! enumerated non-recursively and sorted so batch runs are deterministic.
//! Per-file failures inside a batch are the caller's concern; this module
//! only resolves which files to process.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PdfToolError, Result};
use crate::paths;

/// Resolve a target path into the list of PDF files to process.
///
/// A single file must have a `.pdf` extension. A folder yields its
/// immediate-child PDFs and errors when there are none.
pub fn resolve_targets(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if !paths::is_pdf(target) {
            return Err(PdfToolError::NotAPdf(target.to_path_buf()));
        }
        Ok(vec![target.to_path_buf()])
    } else if target.is_dir() {
        collect_pdfs(target)
    } else {
        Err(PdfToolError::InvalidPath(target.to_path_buf()))
    }
}

/// Enumerate immediate-child `.pdf` files of a folder, sorted by name.
fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && paths::is_pdf(path))
        .collect();
    pdfs.sort();

    if pdfs.is_empty() {
        return Err(PdfToolError::NoPdfsFound(dir.to_path_buf()));
    }
    Ok(pdfs)
}
