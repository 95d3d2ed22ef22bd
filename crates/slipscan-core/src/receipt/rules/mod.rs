//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{parse_amount, AmountExtractor};
pub use dates::{parse_date, DateExtractor};
pub use patterns::*;

/// Trait for field extractors.
///
/// Extractors never fail: a scan either finds a value, finds a candidate it
/// cannot interpret, or finds nothing.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Scan the text for the first candidate and interpret it.
    fn scan(&self, text: &str) -> Scan<Self::Output>;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        self.scan(text).found()
    }
}

/// A value extracted from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Outcome of scanning text for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Scan<T> {
    /// A candidate was found and interpreted.
    Found(ExtractionMatch<T>),
    /// A candidate was found but could not be interpreted.
    Rejected {
        /// Matched text.
        source: String,
        /// Why the candidate was rejected.
        reason: String,
    },
    /// No candidate in the text.
    NotFound,
}

impl<T> Scan<T> {
    /// The match, if one was found and interpreted.
    pub fn found(self) -> Option<ExtractionMatch<T>> {
        match self {
            Scan::Found(m) => Some(m),
            _ => None,
        }
    }

    /// The extracted value, if any.
    pub fn value(self) -> Option<T> {
        self.found().map(|m| m.value)
    }

    /// Human-readable reason for a missing field, `None` when found.
    pub fn diagnostic(&self, field: &str) -> Option<String> {
        match self {
            Scan::Found(_) => None,
            Scan::Rejected { source, reason } => {
                Some(format!("{} candidate {:?} rejected: {}", field, source, reason))
            }
            Scan::NotFound => Some(format!("no {} found", field)),
        }
    }
}
