//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// A recognized date layout: how to find it and how to read it.
#[derive(Debug, Clone, Copy)]
pub struct DateLayout {
    /// Regex source for locating the date in text.
    pub pattern: &'static str,
    /// chrono format string for interpreting the matched text.
    pub format: &'static str,
}

/// Date layouts in priority order.
pub const DATE_LAYOUTS: &[DateLayout] = &[
    // 2024-03-15
    DateLayout {
        pattern: r"\d{4}-\d{2}-\d{2}",
        format: "%Y-%m-%d",
    },
    // 3/5/2024, 03/15/2024
    DateLayout {
        pattern: r"\d{1,2}/\d{1,2}/\d{4}",
        format: "%m/%d/%Y",
    },
];

/// Canonical output form for dates.
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

lazy_static! {
    // All date layouts as one alternation so the leftmost date wins
    pub static ref DATE_PATTERN: Regex = Regex::new(
        &DATE_LAYOUTS
            .iter()
            .map(|layout| format!("(?:{})", layout.pattern))
            .collect::<Vec<_>>()
            .join("|")
    ).unwrap();

    // Optional dollar sign, digits with comma grouping, up to two decimals
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"\$?\s*([\d,]+(?:\.\d{1,2})?)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_pattern_prefers_leftmost() {
        let m = DATE_PATTERN.find("paid 1/2/2024 due 2024-02-01").unwrap();
        assert_eq!(m.as_str(), "1/2/2024");

        let m = DATE_PATTERN.find("2024-02-01 or 1/2/2024").unwrap();
        assert_eq!(m.as_str(), "2024-02-01");
    }

    #[test]
    fn test_amount_pattern_captures_digits() {
        let caps = AMOUNT_PATTERN.captures("Total: $ 1,234.567").unwrap();
        assert_eq!(&caps[0], "$ 1,234.56");
        assert_eq!(&caps[1], "1,234.56");
    }
}
