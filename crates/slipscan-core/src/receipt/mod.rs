//! Expense field extraction from recognized receipt text.

mod category;
mod lines;
mod parser;
pub mod rules;

pub use category::{CategoryClassifier, CategoryRule, CategoryTable};
pub use lines::{source_and_notes, split_lines, trim_text, SourceAndNotes};
pub use parser::{ExpenseParser, ExtractionResult, RecordParser};

use crate::models::record::ExpenseRecord;

/// Extract an expense record using the built-in category table.
pub fn extract_fields(text: &str) -> ExpenseRecord {
    ExpenseParser::new().extract(text)
}
