//! Error types for the slipscan-core library.
//!
//! Field extraction never fails; these errors belong to the acquisition
//! stage (reading, rendering and recognizing documents) and to configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the slipscan library.
#[derive(Error, Debug)]
pub enum SlipscanError {
    /// Text acquisition error.
    #[error("acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract embedded text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to text recognition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load recognition models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Hard failures of the text acquisition stage.
///
/// Decoding and recognition problems are not listed here: they degrade into
/// a placeholder text that still goes through field extraction.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not a supported document type.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The document needs text recognition but no recognizer is configured.
    #[error("no text recognizer available for {}", .0.display())]
    RecognizerUnavailable(PathBuf),

    /// The document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the slipscan library.
pub type Result<T> = std::result::Result<T, SlipscanError>;
