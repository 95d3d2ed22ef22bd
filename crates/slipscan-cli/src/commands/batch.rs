//! Batch command - scan many receipt files matched by a glob pattern.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use slipscan_core::{DocumentKind, ScanOutput, Scanner};

use super::{load_config, with_model_dir};
use crate::output::{record_row, render_output, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: one result per line on stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of scanning a single file.
struct FileResult {
    path: PathBuf,
    output: ScanOutput,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = with_model_dir(load_config(config_path)?, args.model_dir.as_deref());

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && DocumentKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let scanner = Scanner::from_config(&config);
    if !scanner.can_recognize() {
        warn!("No text recognizer loaded, only text files and text PDFs can be scanned");
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let output = match scanner.scan(&path) {
            Ok(document) => document.into_output(&path),
            Err(e) if args.continue_on_error => {
                warn!("Failed to process {}: {}", path.display(), e);
                ScanOutput::failed(&path, e)
            }
            Err(e) => {
                pb.abandon();
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed: {}", e);
            }
        };

        let processing_time_ms = file_start.elapsed().as_millis() as u64;
        write_result(&path, &output, &args, &pb)?;

        results.push(FileResult {
            path,
            output,
            processing_time_ms,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    let failed: Vec<_> = results.iter().filter(|r| r.output.is_failure()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.output.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_result(
    path: &Path,
    output: &ScanOutput,
    args: &BatchArgs,
    pb: &ProgressBar,
) -> anyhow::Result<()> {
    let content = render_output(output, args.format)?;

    match &args.output_dir {
        Some(output_dir) => {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("receipt");
            let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
        None => pb.suspend(|| println!("{}", content.trim_end())),
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "Date",
        "Amount",
        "Source",
        "Category",
        "Notes",
        "Type",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let (status, fields) = match (&result.output.record, &result.output.error) {
            (Some(record), None) => ("success", record_row(record)),
            (Some(record), Some(_)) => ("ocr_failed", record_row(record)),
            (None, _) => ("error", Default::default()),
        };

        let mut row = vec![filename.to_string(), status.to_string()];
        row.extend(fields);
        row.push(result.processing_time_ms.to_string());
        row.push(result.output.error.clone().unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
