//! Expense record parser combining the rule-based extractors.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::{ExpenseRecord, RecordType};

use super::category::{CategoryClassifier, CategoryTable};
use super::lines::source_and_notes;
use super::rules::{AmountExtractor, DateExtractor, FieldExtractor};

/// Result of record extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ExpenseRecord,
    /// Text the record was extracted from.
    pub raw_text: String,
    /// Why optional fields are missing.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for record parsing.
pub trait RecordParser {
    /// Parse an expense record from text. Never fails.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based expense parser.
pub struct ExpenseParser {
    dates: DateExtractor,
    amounts: AmountExtractor,
    classifier: CategoryClassifier,
}

impl ExpenseParser {
    /// Create a parser with the built-in category table.
    pub fn new() -> Self {
        Self::with_categories(CategoryTable::standard())
    }

    /// Create a parser with a custom category table.
    pub fn with_categories(table: CategoryTable) -> Self {
        Self {
            dates: DateExtractor::new(),
            amounts: AmountExtractor::new(),
            classifier: CategoryClassifier::new(table),
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_categories(config.categories.clone())
    }

    /// Extract just the record.
    pub fn extract(&self, text: &str) -> ExpenseRecord {
        self.parse(text).record
    }
}

impl Default for ExpenseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser for ExpenseParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing expense record from {} characters of text", text.len());

        let layout = source_and_notes(text);
        if layout.source.is_none() {
            warnings.push("no source line found".to_string());
        }

        let date_scan = self.dates.scan(text);
        warnings.extend(date_scan.diagnostic("date"));

        let amount_scan = self.amounts.scan(text);
        warnings.extend(amount_scan.diagnostic("amount"));

        let category = self.classifier.classify(text);
        if category.is_none() {
            warnings.push("no category keyword matched".to_string());
        }

        let record = ExpenseRecord {
            date: date_scan.value(),
            amount: amount_scan.value(),
            source: layout.source,
            category,
            notes: layout.notes,
            kind: RecordType::Expense,
        };

        debug!(
            "Extracted record: date={:?} amount={:?} category={:?} ({} warnings)",
            record.date,
            record.amount,
            record.category,
            warnings.len()
        );

        ExtractionResult {
            record,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Category;
    use crate::receipt::CategoryRule;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_receipt() {
        let text = r#"
            Blue Bottle Coffee
            123 Market St
            03/15/2024 08:42
            Latte            $5.25
            Total            $5.25
        "#;

        let parser = ExpenseParser::new();
        let result = parser.parse(text);
        let record = result.record;

        assert_eq!(record.source.as_deref(), Some("Blue Bottle Coffee"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15));
        // Street number comes first in the text.
        assert_eq!(record.amount, Some(123.0));
        assert_eq!(record.category, Some(Category::Food));
        assert_eq!(
            record.notes,
            "123 Market St\n03/15/2024 08:42\nLatte            $5.25\nTotal            $5.25"
        );
        assert_eq!(record.kind, RecordType::Expense);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_line_splitting_example() {
        let record = ExpenseParser::new().extract("Acme Cafe\nLunch with team\n$12.50");

        assert_eq!(record.source.as_deref(), Some("Acme Cafe"));
        assert_eq!(record.notes, "Lunch with team\n$12.50");
        assert_eq!(record.amount, Some(12.5));
        assert_eq!(record.category, Some(Category::Food));
    }

    #[test]
    fn test_single_line() {
        let record = ExpenseParser::new().extract("Acme Cafe");

        assert_eq!(record.source.as_deref(), Some("Acme Cafe"));
        assert_eq!(record.notes, "Acme Cafe");
        assert_eq!(record.amount, None);
        assert_eq!(record.date, None);
    }

    #[test]
    fn test_empty_text() {
        let result = ExpenseParser::new().parse("");

        assert_eq!(result.record, ExpenseRecord::empty(""));
        assert_eq!(result.record.notes, "");
        assert_eq!(
            result.warnings,
            vec![
                "no source line found".to_string(),
                "no date found".to_string(),
                "no amount found".to_string(),
                "no category keyword matched".to_string(),
            ]
        );
    }

    #[test]
    fn test_date_and_amount_examples() {
        let parser = ExpenseParser::new();

        let record = parser.extract("Paid on 2024-03-15");
        assert_eq!(record.date_string().as_deref(), Some("2024-03-15"));

        let record = parser.extract("Paid on 3/5/2024");
        assert_eq!(record.date_string().as_deref(), Some("2024-03-05"));

        let record = parser.extract("Amount due $1,234.56");
        assert_eq!(record.amount, Some(1234.56));

        let record = parser.extract("Items: 42");
        assert_eq!(record.amount, Some(42.0));
    }

    #[test]
    fn test_category_priority_and_absence() {
        let parser = ExpenseParser::new();

        assert_eq!(
            parser.extract("uber ride to restaurant").category,
            Some(Category::Food)
        );
        assert_eq!(parser.extract("Hardware depot").category, None);
    }

    #[test]
    fn test_idempotent() {
        let parser = ExpenseParser::new();
        let text = "Shell\n2024-01-01\nUnleaded $40.00\nthank you";

        assert_eq!(parser.extract(text), parser.extract(text));
    }

    #[test]
    fn test_garbled_input_never_panics() {
        let parser = ExpenseParser::new();

        for (text, amount) in [
            ("\u{0}\u{1}\u{fffd}\u{fffd}", None),
            ("$$$,,,...///---", None),
            ("٢٠٢٤-٠٣-١٥", Some(2024.0)),
            ("99/99/9999 ,,,, $", Some(99.0)),
            ("OCR failed: image decode error", None),
        ] {
            let result = parser.parse(text);
            assert_eq!(result.record.kind, RecordType::Expense);
            assert_eq!(result.record.amount, amount, "amount of {:?}", text);
            assert_eq!(result.raw_text, text);
        }
    }

    #[test]
    fn test_rejected_candidates_are_reported() {
        let result = ExpenseParser::new().parse("Store, 13/45/2024");

        assert_eq!(result.record.date, None);
        assert_eq!(result.record.amount, None);
        assert!(result.warnings.iter().any(|w| w.starts_with("date candidate")));
        assert!(result.warnings.iter().any(|w| w.starts_with("amount candidate")));
    }

    #[test]
    fn test_custom_categories() {
        let parser = ExpenseParser::with_categories(CategoryTable::new(vec![CategoryRule::new(
            Category::Utilities,
            &["gas station"],
        )]));

        assert_eq!(parser.extract("Corner Gas Station").category, Some(Category::Utilities));
        assert_eq!(parser.extract("restaurant").category, None);
    }
}
