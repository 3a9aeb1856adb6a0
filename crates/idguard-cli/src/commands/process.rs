//! Process command - extract identity fields from a single transcript.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use idguard_core::scanner::EMPTY_TEXT_WARNING;
use idguard_core::{DocumentReport, DocumentScanner, FieldKind, Presentation};

use super::config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR transcript file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Image the transcript was recognized from (format and size are recorded)
    #[arg(long)]
    image: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show per-field confidence scores
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Metadata of the source image. The image itself is never analysed.
#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub format: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open image {}: {}", path.display(), e))?
            .with_guessed_format()?;

        let format = reader
            .format()
            .map(|f| format!("{:?}", f).to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Unrecognized image format: {}", path.display()))?;
        let (width, height) = reader.into_dimensions()?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            width,
            height,
        })
    }
}

/// Report plus where it came from.
#[derive(Serialize)]
struct ProcessOutput<'a> {
    source: String,
    processed_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a ImageInfo>,
    #[serde(flatten)]
    report: &'a DocumentReport,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = config::load(config_path)?;
    let scanner = DocumentScanner::from_config(&config)?;

    let text = read_transcript(args.input.as_deref())?;
    let source = source_name(args.input.as_deref());
    info!("Processing transcript: {}", source);

    if text.trim().is_empty() {
        eprintln!("{} {}", style("⚠").yellow(), EMPTY_TEXT_WARNING);
    }

    let image = args.image.as_deref().map(ImageInfo::read).transpose()?;
    if let Some(info) = &image {
        debug!("Image {}x{} ({})", info.width, info.height, info.format);
    }

    let report = scanner.scan(&text);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string(&ProcessOutput {
            source,
            processed_at: chrono::Utc::now().to_rfc3339(),
            image: image.as_ref(),
            report: &report,
        })?,
        OutputFormat::Csv => format_csv(&report)?,
        OutputFormat::Text => format_text(&scanner, &report, &text),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        for (kind, confidence) in &report.fields.field_confidence {
            println!(
                "{} {} confidence: {:.0}%",
                style("ℹ").blue(),
                kind,
                confidence * 100.0
            );
        }
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            report.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read a transcript from a file, or from stdin for `None` and `-`.
pub fn read_transcript(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            Ok(decode_lossy(fs::read(path)?))
        }
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Ok(decode_lossy(bytes))
        }
    }
}

/// Decode OCR output, replacing invalid UTF-8 with U+FFFD instead of failing.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("Transcript is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

fn source_name(input: Option<&Path>) -> String {
    match input {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "stdin".to_string(),
    }
}

/// Render a report in a non-JSON format.
pub fn format_report(
    scanner: &DocumentScanner,
    report: &DocumentReport,
    text: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(scanner, report, text)),
    }
}

fn format_csv(report: &DocumentReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id_number",
        "name",
        "date_of_birth",
        "gender",
        "is_identity_document",
        "redactions",
    ])?;

    let fields = &report.fields;
    let is_identity_document = fields.is_identity_document.to_string();
    let redactions = report.redactions.total().to_string();
    wtr.write_record([
        fields.id_number.as_deref().unwrap_or_default(),
        fields.name.as_deref().unwrap_or_default(),
        fields.date_of_birth.as_deref().unwrap_or_default(),
        fields.gender.as_deref().unwrap_or_default(),
        is_identity_document.as_str(),
        redactions.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Identity documents show their fields; anything else shows its text.
fn format_text(scanner: &DocumentScanner, report: &DocumentReport, text: &str) -> String {
    let mut output = String::new();

    match scanner.present(report, text) {
        Presentation::Fields(fields) => {
            output.push_str("Identity document detected\n\n");
            for kind in FieldKind::ALL {
                output.push_str(&format!("{}: {}\n", kind, fields.get(kind)));
            }
        }
        Presentation::Text { raw, masked } => {
            output.push_str("No identity document detected\n");
            if let Some(raw) = raw {
                output.push_str("\nExtracted text:\n");
                output.push_str(raw.trim_end());
                output.push('\n');
            }
            if let Some(masked) = masked {
                output.push_str("\nMasked text:\n");
                output.push_str(masked.trim_end());
                output.push('\n');
            }
        }
    }

    if !report.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &report.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lossy_replaces_invalid_bytes() {
        assert_eq!(decode_lossy(b"4821 0937 5566".to_vec()), "4821 0937 5566");
        assert_eq!(decode_lossy(b"\xff\xfe call".to_vec()), "\u{fffd}\u{fffd} call");
    }

    #[test]
    fn test_text_shows_fields_for_identity_document() {
        let scanner = DocumentScanner::new();
        let text = "UIDAI\nName: Asha Verma\nDOB: 01/02/1985\nGender: F";
        let report = scanner.scan(text);

        let rendered = format_text(&scanner, &report, text);
        assert!(rendered.contains("Full Name: Asha Verma"));
        assert!(rendered.contains("Aadhaar Number: Not found"));
        assert!(!rendered.contains("Extracted text"));
    }

    #[test]
    fn test_text_shows_masked_text_otherwise() {
        let scanner = DocumentScanner::new();
        let text = "Reach me at 9876543210";
        let report = scanner.scan(text);

        let rendered = format_text(&scanner, &report, text);
        assert!(rendered.contains("Extracted text:\nReach me at 9876543210"));
        assert!(rendered.contains("Masked text:\nReach me at ██████████"));
    }

    #[test]
    fn test_csv_leaves_missing_fields_empty() {
        let report = DocumentScanner::new().scan("Gender: Male");
        let csv = format_csv(&report).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id_number,name,date_of_birth,gender,is_identity_document,redactions")
        );
        assert_eq!(lines.next(), Some(",,,Male,false,0"));
    }
}
