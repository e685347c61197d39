mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, OutputFormat};
use cr_extract::{normalize, AppConfig, ExtractionReport, FieldExtractor, FormState};
use cr_ocr::{OcrEngine, OcrInput, PaddleJsonEngine};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
  let args = Args::parse();
  init_tracing(args.verbose);

  if let Err(e) = run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

async fn run(args: Args) -> Result<()> {
  match args.command {
    Commands::Version => {
      println!("cr-extract {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Fields { config } => {
      let config = load_config(config.as_deref())?;
      for spec in config.field_specs() {
        println!("{}\t{}\t{}", spec.label, spec.band, spec.positions);
      }
    }
    Commands::Extract {
      input,
      config,
      fuzz_threshold,
      band_tolerance,
      exclude_label_token,
      page,
      format,
    } => {
      let mut config = load_config(config.as_deref())?;
      if let Some(threshold) = fuzz_threshold {
        config.extractor.fuzz_threshold = threshold;
      }
      if let Some(tolerance) = band_tolerance {
        config.extractor.band_tolerance = tolerance;
      }
      if exclude_label_token {
        config.extractor.exclude_label_token = true;
      }
      config.validate().context("Invalid extraction settings")?;

      let source = input.display().to_string();
      let ocr_input = read_input(input).await?;

      let engine = PaddleJsonEngine::new().with_page(page);
      let output = engine
        .recognize(&ocr_input)
        .await
        .with_context(|| format!("Failed to read OCR output from {}", source))?;
      debug!(detections = output.detections.len(), "OCR output loaded");

      let normalized = normalize(&output.detections);
      if normalized.tokens.is_empty() {
        info!("no usable tokens; every field will be blank");
      }

      let extractor = FieldExtractor::new(config.extractor);
      let fields = extractor.extract_all(&normalized.tokens, &config.field_specs());

      match format {
        OutputFormat::Json => {
          let report = ExtractionReport::new(source, &config.extractor, &normalized, fields);
          println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Form => {
          let form = FormState::default().apply(&fields);
          for (label, value) in form.iter() {
            println!("{}:", label);
            for line in value.lines() {
              println!("  {}", line);
            }
          }
        }
      }
    }
  }

  Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
  match path {
    Some(path) => Ok(AppConfig::load(path)?),
    None => Ok(AppConfig::default()),
  }
}

async fn read_input(input: PathBuf) -> Result<OcrInput> {
  if input.as_os_str() == "-" {
    let mut data = Vec::new();
    tokio::io::stdin()
      .read_to_end(&mut data)
      .await
      .context("Failed to read OCR output from stdin")?;
    return Ok(OcrInput::Bytes(data));
  }
  Ok(OcrInput::FilePath(input))
}
