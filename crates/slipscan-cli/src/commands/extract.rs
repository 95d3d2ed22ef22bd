//! Extract command - run field extraction on text that is already recognized.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;

use slipscan_core::{ExpenseParser, RecordParser};

use super::load_config;
use crate::output::{render_record, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file to read, or `-` for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print why fields could not be extracted
    #[arg(long)]
    warnings: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        text
    } else {
        let path = PathBuf::from(&args.input);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?
    };

    let parser = ExpenseParser::from_config(&config.extraction);
    let result = parser.parse(&text);

    if args.warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    println!("{}", render_record(&result.record, args.format)?.trim_end());

    Ok(())
}
