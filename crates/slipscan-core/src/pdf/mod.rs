//! PDF loading, embedded text and page images.

mod extractor;

pub use extractor::PdfDocument;
pub(crate) use extractor::meaningful_len;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
