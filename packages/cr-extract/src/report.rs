use chrono::Utc;
use serde::Serialize;

use crate::extractor::{ExtractionResult, ExtractorConfig};
use crate::geometry::Normalized;

/// A rejected detection as it appears in a report.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedDetection {
    pub index: usize,
    pub reason: String,
}

/// JSON document printed by `cr-extract extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub generated_at: String,
    pub source: String,
    pub fuzz_threshold: u8,
    pub band_tolerance: f32,
    pub token_count: usize,
    pub rejected_detections: Vec<RejectedDetection>,
    pub fields: ExtractionResult,
}

impl ExtractionReport {
    pub fn new(
        source: impl Into<String>,
        config: &ExtractorConfig,
        normalized: &Normalized,
        fields: ExtractionResult,
    ) -> Self {
        let rejected_detections = normalized
            .rejected
            .iter()
            .map(|err| RejectedDetection {
                index: err.index(),
                reason: err.to_string(),
            })
            .collect();

        Self {
            generated_at: Utc::now().to_rfc3339(),
            source: source.into(),
            fuzz_threshold: config.fuzz_threshold,
            band_tolerance: config.band_tolerance,
            token_count: normalized.tokens.len(),
            rejected_detections,
            fields,
        }
    }
}
