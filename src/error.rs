use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfToolError {
    #[error("The specified path is neither a file nor a folder: {0}")]
    InvalidPath(PathBuf),

    #[error("The specified file is not a PDF: {0}")]
    NotAPdf(PathBuf),

    #[error("No PDF files found in the specified folder: {0}")]
    NoPdfsFound(PathBuf),

    #[error("Failed to process PDF: {0}")]
    PdfProcessing(String),

    #[error("Document has no pages: {0}")]
    EmptyDocument(PathBuf),

    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { name: &'static str, value: f32 },

    #[error("Bundled resource not found: {0}")]
    MissingResource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for PdfToolError {
    fn from(err: lopdf::Error) -> Self {
        PdfToolError::PdfProcessing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PdfToolError>;
