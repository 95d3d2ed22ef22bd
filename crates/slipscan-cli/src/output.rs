//! Rendering scan results as JSON, CSV or plain text.

use slipscan_core::{ExpenseRecord, ScanOutput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-document output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

const RECORD_COLUMNS: [&str; 6] = ["Date", "Amount", "Source", "Category", "Notes", "Type"];

/// Render a full scan output envelope.
pub fn render_output(output: &ScanOutput, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(output)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);

            let mut header = vec!["source"];
            header.extend(RECORD_COLUMNS);
            header.push("error");
            wtr.write_record(&header)?;

            let mut row = vec![output.source.clone()];
            match &output.record {
                Some(record) => row.extend(record_row(record)),
                None => row.extend(std::iter::repeat_n(String::new(), RECORD_COLUMNS.len())),
            }
            row.push(output.error.clone().unwrap_or_default());
            wtr.write_record(&row)?;

            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut text = format!("File:     {}\n", output.source);
            if let Some(error) = &output.error {
                text.push_str(&format!("Error:    {}\n", error));
            }
            if let Some(record) = &output.record {
                text.push_str(&record_text(record));
            }
            Ok(text)
        }
    }
}

/// Render a bare expense record.
pub fn render_record(record: &ExpenseRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(RECORD_COLUMNS)?;
            wtr.write_record(record_row(record))?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(record_text(record)),
    }
}

/// Record fields in `RECORD_COLUMNS` order, absent values as empty strings.
pub fn record_row(record: &ExpenseRecord) -> [String; 6] {
    [
        record.date_string().unwrap_or_default(),
        record.amount.map(|a| a.to_string()).unwrap_or_default(),
        record.source.clone().unwrap_or_default(),
        record.category.map(|c| c.to_string()).unwrap_or_default(),
        record.notes.clone(),
        record.kind.to_string(),
    ]
}

fn record_text(record: &ExpenseRecord) -> String {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    let mut text = String::new();
    text.push_str(&format!("Date:     {}\n", or_dash(record.date_string())));
    text.push_str(&format!(
        "Amount:   {}\n",
        or_dash(record.amount.map(|a| format!("{:.2}", a)))
    ));
    text.push_str(&format!("Source:   {}\n", or_dash(record.source.clone())));
    text.push_str(&format!(
        "Category: {}\n",
        or_dash(record.category.map(|c| c.to_string()))
    ));
    text.push_str(&format!("Type:     {}\n", record.kind));

    if !record.notes.is_empty() {
        text.push_str("Notes:\n");
        for line in record.notes.lines() {
            text.push_str(&format!("  {}\n", line));
        }
    }

    text
}
