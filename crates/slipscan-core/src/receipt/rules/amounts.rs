//! Amount extraction for receipts.

use super::patterns::AMOUNT_PATTERN;
use super::{ExtractionMatch, FieldExtractor, Scan};

/// Amount field extractor.
///
/// Takes the first number in the text, with or without a currency sign.
/// A bare number that is part of a date or an address still counts.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = f64;

    fn scan(&self, text: &str) -> Scan<Self::Output> {
        let Some(caps) = AMOUNT_PATTERN.captures(text) else {
            return Scan::NotFound;
        };
        let (Some(full), Some(number)) = (caps.get(0), caps.get(1)) else {
            return Scan::NotFound;
        };

        match parse_amount(number.as_str()) {
            Some(amount) => Scan::Found(
                ExtractionMatch::new(amount, full.as_str()).with_position(full.start(), full.end()),
            ),
            None => Scan::Rejected {
                source: full.as_str().to_string(),
                reason: "not a number".to_string(),
            },
        }
    }
}

/// First code point of each run of ten decimal digits (Unicode `Nd`).
const DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// ASCII value of a decimal digit from any script.
fn decimal_digit(c: char) -> Option<char> {
    let code = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// Parse an amount with comma thousands separators (e.g. "1,234.56").
///
/// Digits from any script are read by value, so "١٢٣" is 123.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|&c| c != ',')
        .map(|c| decimal_digit(c).unwrap_or(c))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}
