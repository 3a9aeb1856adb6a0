//! Mask command - write the masked transcript only.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use idguard_core::{MaskStrategy, PiiMasker};

use super::config;
use super::process::read_transcript;

/// File name used when `--output` is given without a value.
const DEFAULT_OUTPUT: &str = "masked-text.txt";

/// Arguments for the mask command.
#[derive(Args)]
pub struct MaskArgs {
    /// OCR transcript file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Write to a file instead of stdout (default name: masked-text.txt)
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_OUTPUT)]
    output: Option<PathBuf>,

    /// Override the configured overlap strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Print per-category redaction counts to stderr
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum StrategyArg {
    /// Apply patterns one after another
    Sequential,
    /// Keep the leftmost, longest match across all patterns
    LongestMatch,
}

impl From<StrategyArg> for MaskStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => MaskStrategy::Sequential,
            StrategyArg::LongestMatch => MaskStrategy::LongestMatch,
        }
    }
}

pub async fn run(args: MaskArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = config::load(config_path)?;

    let mut masker = PiiMasker::from_config(&config.masking)?;
    if let Some(strategy) = args.strategy {
        masker = masker.with_strategy(strategy.into());
    }

    let text = read_transcript(args.input.as_deref())?;
    let outcome = masker.mask_with_summary(&text);
    info!("Masked {} spans", outcome.redactions.total());

    if let Some(output_path) = &args.output {
        fs::write(output_path, &outcome.text)?;
        eprintln!(
            "{} Masked text written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", outcome.text);
    }

    if args.summary {
        for (category, count) in outcome.redactions.iter() {
            eprintln!("{:>16}: {}", category.as_str(), count);
        }
        eprintln!("{:>16}: {}", "total", outcome.redactions.total());
    }

    Ok(())
}
