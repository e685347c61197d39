//! Command line arguments backing the `cr-extract` binary.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "cr-extract",
  about = "Extract vehicle registration fields from PaddleOCR output",
  version
)]
pub struct Args {
  /// Log extraction decisions to stderr
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Extract fields from a PaddleOCR JSON dump
  Extract {
    /// OCR dump to read, or `-` for stdin
    input: PathBuf,

    /// JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Minimum partial similarity (0-100) for a label match
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    fuzz_threshold: Option<u8>,

    /// Maximum vertical pixel distance for tokens on the same line
    #[arg(long)]
    band_tolerance: Option<f32>,

    /// Leave the label token out of same-line values
    #[arg(long)]
    exclude_label_token: bool,

    /// Page of a multi-page dump to read
    #[arg(long, default_value = "0")]
    page: usize,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
  },
  /// List the active field table
  Fields {
    /// JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  /// JSON report with every extracted field
  Json,
  /// Review form, one block per form field
  Form,
}
