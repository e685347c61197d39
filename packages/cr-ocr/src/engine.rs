use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::detection::Detection;

#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Default)]
pub struct OcrOutput {
    pub text: String,
    pub detections: Vec<Detection>,
}

impl OcrOutput {
    pub fn from_detections(detections: Vec<Detection>) -> Self {
        let text = detections
            .iter()
            .filter_map(|d| d.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        Self { text, detections }
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Produces raw detections for a single image.
///
/// An engine that finds nothing returns an empty [`OcrOutput`]; errors are
/// reserved for input the engine could not process at all.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError>;
}
