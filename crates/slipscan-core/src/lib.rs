//! Core library for receipt scanning.
//!
//! This crate provides:
//! - Text acquisition from PDFs, images and plain text files
//! - Text recognition using `pure-onnx-ocr` models (feature `native`)
//! - Expense field extraction (date, amount, source, category, notes)
//! - Expense record and scan output models

pub mod acquire;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod receipt;
pub mod scanner;

pub use acquire::{Acquired, AcquisitionMethod, DocumentKind, TextAcquirer};
pub use error::{AcquisitionError, OcrError, PdfError, Result, SlipscanError};
pub use models::config::SlipscanConfig;
pub use models::record::{Category, ExpenseRecord, RecordType};
pub use models::scan::ScanOutput;
pub use ocr::TextRecognizer;
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;
pub use receipt::{extract_fields, CategoryTable, ExpenseParser, ExtractionResult, RecordParser};
pub use scanner::{ScannedDocument, Scanner};
