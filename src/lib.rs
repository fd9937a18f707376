//! pdftool: shrink PDF files and stamp diagonal text watermarks on them.
//!
//! Two operations, each a short pipeline over lopdf:
//!
//! - Shrink: load, recompress streams, save with object and xref streams.
//! - Watermark: render a one-page overlay PDF matching the target's first
//!   page, composite it on top of every page, clean up the overlay.
//!
//! Both accept a single `.pdf` file or a folder of PDFs (non-recursive).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pdftool::{add_watermark, WatermarkFont, WatermarkOptions};
//!
//! let options = WatermarkOptions {
//!     text: "DRAFT".to_string(),
//!     rotation: 45,
//!     gray: 0.3,
//!     alpha: 0.6,
//!     font: WatermarkFont::Helvetica,
//!     font_size: 45,
//! };
//!
//! let output = add_watermark(Path::new("report.pdf"), &options, false).unwrap();
//! assert_eq!(output, Some("report_watermarked.pdf".into()));
//! ```

pub mod cli;
pub mod dispatch;
pub mod error;
pub mod license;
pub mod paths;
pub mod shrink;
pub mod watermark;

pub use dispatch::resolve_targets;
pub use error::{PdfToolError, Result};
pub use shrink::shrink_pdf;
pub use watermark::{add_watermark, WatermarkFont, WatermarkOptions};

#[cfg(test)]
pub(crate) mod test_support;
