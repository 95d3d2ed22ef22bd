//! Output envelope combining acquisition metadata with the extracted record.

use std::path::Path;

use serde::Serialize;

use super::record::ExpenseRecord;

/// What a single document scan emits.
///
/// On success the record's six fields are inlined next to `source` and
/// `ocr_text`. On a hard acquisition failure only `source`, an empty
/// `ocr_text` and `error` are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutput {
    /// Path of the scanned document.
    pub source: String,

    /// Text handed to field extraction.
    pub ocr_text: String,

    /// Acquisition error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Extracted fields.
    #[serde(flatten)]
    pub record: Option<ExpenseRecord>,
}

impl ScanOutput {
    /// Envelope for a document whose text went through extraction.
    pub fn extracted(
        path: &Path,
        ocr_text: impl Into<String>,
        error: Option<String>,
        record: ExpenseRecord,
    ) -> Self {
        Self {
            source: path.display().to_string(),
            ocr_text: ocr_text.into(),
            error,
            record: Some(record),
        }
    }

    /// Envelope for a document that could not be acquired at all.
    pub fn failed(path: &Path, error: impl ToString) -> Self {
        Self {
            source: path.display().to_string(),
            ocr_text: String::new(),
            error: Some(error.to_string()),
            record: None,
        }
    }

    /// Whether acquisition failed before extraction.
    pub fn is_failure(&self) -> bool {
        self.record.is_none()
    }
}
