//! Shrink pipeline.
//!
//! The whole operation is delegated to lopdf: recompress every stream with
//! flate, then save with object streams and cross-reference streams for an
//! optimized, progressively-loadable file. There is no size-based decision
//! logic; the document is always rewritten.

use std::fs::File;
use std::path::Path;

use lopdf::{Document, SaveOptions};

use crate::error::Result;

/// Rewrite `input` as a recompressed, optimized PDF at `output`.
///
/// The document is fully loaded into memory before the output file is
/// created, so `output` may equal `input` to overwrite in place.
pub fn shrink_pdf(input: &Path, output: &Path) -> Result<()> {
    let mut doc = Document::load(input)?;
    doc.compress();

    let options = SaveOptions::builder()
        .use_object_streams(true)
        .use_xref_streams(true)
        .compression_level(9)
        .build();

    let mut file = File::create(output)?;
    doc.save_with_options(&mut file, options)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_fixture_pdf;

    #[test]
    fn test_shrink_preserves_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        build_fixture_pdf(&input, 3);

        let output = dir.path().join("output.pdf");
        shrink_pdf(&input, &output).unwrap();

        let doc = Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_shrink_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        build_fixture_pdf(&input, 2);

        shrink_pdf(&input, &input).unwrap();

        let doc = Document::load(&input).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_shrink_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("not-a-pdf.pdf");
        std::fs::write(&input, b"this is not a pdf").unwrap();

        let output = dir.path().join("output.pdf");
        assert!(shrink_pdf(&input, &output).is_err());
    }
}
