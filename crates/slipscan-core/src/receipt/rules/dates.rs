//! Date extraction for receipts.

use chrono::{Datelike, NaiveDate};

use super::patterns::{DATE_LAYOUTS, DATE_OUTPUT_FORMAT, DATE_PATTERN};
use super::{ExtractionMatch, FieldExtractor, Scan};

/// Date field extractor.
///
/// Finds the leftmost text matching any layout in [`DATE_LAYOUTS`], then
/// reads it with each layout's format in priority order.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn scan(&self, text: &str) -> Scan<Self::Output> {
        let Some(found) = DATE_PATTERN.find(text) else {
            return Scan::NotFound;
        };

        match parse_date(found.as_str()) {
            Some(date) => Scan::Found(
                ExtractionMatch::new(date, found.as_str())
                    .with_position(found.start(), found.end()),
            ),
            None => Scan::Rejected {
                source: found.as_str().to_string(),
                reason: "not a valid calendar date".to_string(),
            },
        }
    }
}

/// Interpret text as a date using the first layout that accepts it.
///
/// Year 0 is out of range.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_LAYOUTS.iter().find_map(|layout| {
        NaiveDate::parse_from_str(s, layout.format)
            .ok()
            .filter(|date| date.year() >= 1)
    })
}

/// Format a date in canonical `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_OUTPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_date_iso() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("Date: 2024-03-15").unwrap();
        assert_eq!(result.value, ymd(2024, 3, 15));
        assert_eq!(result.source, "2024-03-15");
        assert_eq!(result.position, Some((6, 16)));
    }

    #[test]
    fn test_extract_date_us_short() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("visited 3/5/2024");
        assert_eq!(result.unwrap().value, ymd(2024, 3, 5));
    }

    #[test]
    fn test_extract_date_us_padded() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("12/31/2023 closing");
        assert_eq!(result.unwrap().value, ymd(2023, 12, 31));
    }

    #[test]
    fn test_first_date_wins_regardless_of_layout() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("ordered 1/2/2024, shipped 2024-01-05");
        assert_eq!(result.unwrap().value, ymd(2024, 1, 2));
    }

    #[test]
    fn test_invalid_date_is_rejected_not_skipped() {
        let extractor = DateExtractor::new();

        // The first candidate is invalid; later valid dates are not consulted.
        let scan = extractor.scan("13/45/2024 then 2024-01-05");
        assert!(matches!(scan, Scan::Rejected { ref source, .. } if source == "13/45/2024"));
        assert!(extractor.extract("2024-02-30").is_none());
    }

    #[test]
    fn test_year_zero_is_rejected() {
        let extractor = DateExtractor::new();

        assert!(matches!(extractor.scan("0000-03-15"), Scan::Rejected { .. }));
        assert!(extractor.extract("3/15/0000").is_none());
        assert_eq!(parse_date("0001-01-01"), Some(ymd(1, 1, 1)));
    }

    #[test]
    fn test_no_date() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.scan("no dates here 2024"), Scan::NotFound);
        assert!(extractor.extract("").is_none());
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(parse_date("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("3/5/2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024/03/15"), None);
        assert_eq!(format_date(ymd(2024, 3, 5)), "2024-03-05");
    }
}
