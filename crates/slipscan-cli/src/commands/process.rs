//! Process command - scan a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use slipscan_core::{ScanOutput, Scanner};

use super::{load_config, with_model_dir};
use crate::output::{render_output, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, image or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Print why fields could not be extracted
    #[arg(long)]
    warnings: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = with_model_dir(load_config(config_path)?, args.model_dir.as_deref());
    let scanner = Scanner::from_config(&config);

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Scanning {}...", args.input.display()));

    let result = scanner.scan(&args.input);
    pb.finish_and_clear();

    let document = match result {
        Ok(document) => document,
        Err(e) => {
            let failed = ScanOutput::failed(&args.input, &e);
            write_output(&render_output(&failed, args.format)?, args.output.as_ref())?;
            return Err(e.into());
        }
    };

    if args.warnings {
        for warning in &document.extraction.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let output = document.into_output(&args.input);
    write_output(&render_output(&output, args.format)?, args.output.as_ref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn write_output(content: &str, path: Option<&PathBuf>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}
