use anyhow::Result;
use cr_extract::prelude::*;
use cr_ocr::{OcrEngine, OcrInput, PaddleJsonEngine};

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/cr_book.json".to_string());

    // Replay a PaddleOCR dump instead of running the model
    let output = PaddleJsonEngine::new()
        .recognize(&OcrInput::FilePath(path.clone().into()))
        .await?;
    let normalized = normalize(&output.detections);

    println!("OCR dump: {}", path);
    println!("  Detections: {}", output.detections.len());
    println!("  Tokens: {}", normalized.tokens.len());
    for rejected in &normalized.rejected {
        println!("  Skipped: {}", rejected);
    }
    println!();

    let extractor = FieldExtractor::new(ExtractorConfig::default());
    let specs = default_field_specs();

    for spec in &specs {
        match extractor.locate_label(&normalized.tokens, &spec.label) {
            Some(label) => println!(
                "{:<30} matched {:?} (score {}, y {:.1})",
                spec.label,
                label.token.text,
                label.score,
                label.mid_y()
            ),
            None => println!("{:<30} not found", spec.label),
        }
    }
    println!();

    // The caller owns the form; extraction only fills it in
    let mut form = FormState::default();
    form = form.apply(&extractor.extract_all(&normalized.tokens, &specs));
    form.set("Country of Origin", "JAPAN");

    println!("{}", "=".repeat(60));
    for (label, value) in form.iter() {
        println!("{:<30} {}", label, value.replace('\n', " | "));
    }

    Ok(())
}
