//! Expense record produced by field extraction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::receipt::rules::dates::format_date;
use crate::receipt::trim_text;

/// Structured fields derived from one document's text.
///
/// Serializes with the six keys `Date`, `Amount`, `Source`, `Category`,
/// `Notes` and `Type`. Absent values are written as `null`, never skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// First date found in the text, normalized to `YYYY-MM-DD`.
    #[serde(rename = "Date")]
    pub date: Option<NaiveDate>,

    /// First amount found in the text.
    #[serde(rename = "Amount")]
    pub amount: Option<f64>,

    /// First non-blank line of the text.
    #[serde(rename = "Source")]
    pub source: Option<String>,

    /// Category of the first matching keyword table.
    #[serde(rename = "Category")]
    pub category: Option<Category>,

    /// Lines after the source line, or the whole trimmed text.
    #[serde(rename = "Notes")]
    pub notes: String,

    /// Record type, always `expense`.
    #[serde(rename = "Type", default)]
    pub kind: RecordType,
}

impl ExpenseRecord {
    /// A record with every field at its default for the given text.
    pub fn empty(text: &str) -> Self {
        Self {
            date: None,
            amount: None,
            source: None,
            category: None,
            notes: trim_text(text).to_string(),
            kind: RecordType::Expense,
        }
    }

    /// Date in its canonical textual form.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(format_date)
    }

    /// Names of the optional fields that were not extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("Date");
        }
        if self.amount.is_none() {
            missing.push("Amount");
        }
        if self.source.is_none() {
            missing.push("Source");
        }
        if self.category.is_none() {
            missing.push("Category");
        }
        missing
    }
}

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Shopping,
    Entertainment,
}

impl Category {
    /// All categories in classification order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Shopping,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Kind of record. Only expenses are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    #[default]
    Expense,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Expense => f.write_str("expense"),
        }
    }
}
