//! Watermark pipeline.
//!
//! Stamps diagonal text on every page of a PDF: read the first page's
//! dimensions, render a matching one-page overlay PDF next to the target,
//! reopen it and composite it on top of each page, then save and delete the
//! overlay. All pages are assumed to share the first page's dimensions;
//! documents with mixed page sizes get every page stamped with the first
//! page's overlay.

pub mod metrics;
mod overlay;
mod stamp;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use lopdf::Document;

use crate::error::{PdfToolError, Result};
use crate::paths;

/// The builtin fonts the watermark may use. Closed set, validated at the
/// CLI boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum WatermarkFont {
    #[default]
    #[value(name = "Helvetica")]
    Helvetica,
    #[value(name = "Times-Roman")]
    TimesRoman,
    #[value(name = "Courier")]
    Courier,
    #[value(name = "Symbol")]
    Symbol,
    #[value(name = "ZapfDingbats")]
    ZapfDingbats,
}

impl WatermarkFont {
    /// The PostScript base-font name written into the PDF font dictionary.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            WatermarkFont::Helvetica => "Helvetica",
            WatermarkFont::TimesRoman => "Times-Roman",
            WatermarkFont::Courier => "Courier",
            WatermarkFont::Symbol => "Symbol",
            WatermarkFont::ZapfDingbats => "ZapfDingbats",
        }
    }
}

impl fmt::Display for WatermarkFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

/// Parameters for one watermark invocation.
#[derive(Debug, Clone)]
pub struct WatermarkOptions {
    /// Text drawn once per page, centred.
    pub text: String,
    /// Rotation in degrees, counter-clockwise.
    pub rotation: i32,
    /// Ink level: 0.0 is white, 1.0 is black.
    pub gray: f32,
    /// Opacity: 0.0 transparent, 1.0 opaque.
    pub alpha: f32,
    pub font: WatermarkFont,
    /// Font size in points.
    pub font_size: u32,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            rotation: 35,
            gray: 0.5,
            alpha: 0.5,
            font: WatermarkFont::Helvetica,
            font_size: 45,
        }
    }
}

impl WatermarkOptions {
    /// Reject out-of-range levels before any file is touched.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("gray", self.gray), ("alpha", self.alpha)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PdfToolError::OutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Deletes the transient overlay PDF when the watermark operation returns,
/// on success and error paths alike.
struct TempOverlay {
    path: PathBuf,
}

impl Drop for TempOverlay {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to remove temporary overlay {}: {err}",
                    self.path.display()
                );
            }
        }
    }
}

/// Add a diagonal watermark to each page of `target`.
///
/// Returns the output path, or `None` when the file was skipped because its
/// name already carries the watermarked marker.
pub fn add_watermark(
    target: &Path,
    options: &WatermarkOptions,
    overwrite: bool,
) -> Result<Option<PathBuf>> {
    options.validate()?;

    if paths::is_already_watermarked(target) {
        log::warn!(
            "The file '{}' appears to already be watermarked. Skipping.",
            target.display()
        );
        return Ok(None);
    }

    let output = if overwrite {
        target.to_path_buf()
    } else {
        paths::with_stem_suffix(target, paths::WATERMARKED_MARKER)
    };

    let mut doc = Document::load(target)?;
    let first_page_id = *doc
        .get_pages()
        .values()
        .next()
        .ok_or_else(|| PdfToolError::EmptyDocument(target.to_path_buf()))?;
    let (page_width, page_height) = stamp::first_page_dimensions(&doc, first_page_id)?;

    let overlay_path = paths::with_stem_suffix(target, paths::TEMP_OVERLAY_SUFFIX);
    let _guard = TempOverlay {
        path: overlay_path.clone(),
    };

    overlay::render_overlay(&overlay_path, options, page_width, page_height)?;
    let overlay_doc = Document::load(&overlay_path)?;
    stamp::stamp_all_pages(&mut doc, overlay_doc)?;

    doc.save(&output)?;
    log::info!("Watermarked PDF saved to: {}", output.display());
    Ok(Some(output))
}
