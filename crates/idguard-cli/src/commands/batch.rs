//! Batch processing command for multiple transcripts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use idguard_core::{DocumentReport, DocumentScanner, FieldKind};

use super::config;
use super::process::{decode_lossy, format_report, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// A transcript and its report.
struct Scanned {
    text: String,
    report: DocumentReport,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: Result<Scanned, String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = config::load(config_path)?;
    let scanner = Arc::new(DocumentScanner::from_config(&config)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for path in files {
        let scanner = Arc::clone(&scanner);
        let permit = Arc::clone(&semaphore).acquire_owned().await?;

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = scan_file(&path, &scanner).map_err(|e| e.to_string());

            ProcessResult {
                path,
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            }
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let result = joined?;

        if let Err(error_msg) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");
    results.sort_by(|a, b| a.path.cmp(&b.path));

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Ok(scanned) = &result.outcome {
                let output_path = output_path(output_dir, &result.path, args.format);
                let content = format_report(&scanner, &scanned.report, &scanned.text, args.format)?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let identity_documents = results
        .iter()
        .filter(|r| matches!(&r.outcome, Ok(s) if s.report.fields.is_identity_document))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} identity documents), {} failed",
        style(results.len() - failed.len()).green(),
        identity_documents,
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(error_msg) = &result.outcome {
                println!("  - {}: {}", result.path.display(), error_msg);
            }
        }
    }

    Ok(())
}

fn scan_file(path: &Path, scanner: &DocumentScanner) -> anyhow::Result<Scanned> {
    let text = decode_lossy(fs::read(path)?);
    if text.trim().is_empty() {
        warn!("No text in {}", path.display());
    }

    let report = scanner.scan(&text);
    Ok(Scanned { text, report })
}

fn output_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let output_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("transcript");

    output_dir.join(format!("{}.{}", output_name, format.extension()))
}

/// Summary rows carry only found/missing flags and counts, never field values.
fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "is_identity_document",
        "id_number_found",
        "name_found",
        "date_of_birth_found",
        "gender_found",
        "redactions",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        match &result.outcome {
            Ok(scanned) => {
                let fields = &scanned.report.fields;
                let found = |kind: FieldKind| fields.get(kind).is_found().to_string();

                wtr.write_record([
                    filename.to_string(),
                    "success".to_string(),
                    fields.is_identity_document.to_string(),
                    found(FieldKind::IdNumber),
                    found(FieldKind::Name),
                    found(FieldKind::DateOfBirth),
                    found(FieldKind::Gender),
                    scanned.report.redactions.total().to_string(),
                    time_ms,
                    String::new(),
                ])?;
            }
            Err(error_msg) => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    time_ms.as_str(),
                    error_msg.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
