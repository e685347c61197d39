use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::detection::{Detection, Point};
use crate::engine::{OcrEngine, OcrError, OcrInput, OcrOutput};

/// Replays the JSON dump of a PaddleOCR `ocr()` call.
///
/// Accepts either the full per-page result (`[[det, det, ...], ...]`, pages
/// may be `null`) or a bare list of detections. Each detection has the shape
/// `[[[x, y], [x, y], [x, y], [x, y]], [text, confidence]]`.
#[derive(Debug, Clone, Default)]
pub struct PaddleJsonEngine {
    page: usize,
}

impl PaddleJsonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects which page of a multi-page dump to read.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

#[async_trait]
impl OcrEngine for PaddleJsonEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let detections = match input {
            OcrInput::FilePath(path) => {
                let data = tokio::fs::read(path).await.map_err(|source| OcrError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_paddle_json(&data, self.page)?
            }
            OcrInput::Bytes(data) => parse_paddle_json(data, self.page)?,
        };
        Ok(OcrOutput::from_detections(detections))
    }
}

/// Decodes a PaddleOCR dump into raw detections.
///
/// Only a document that is not JSON, or is not a list, is an error. Individual
/// detections are decoded leniently: a broken quad or missing text still yields
/// a [`Detection`] so the caller can decide what to do with it.
pub fn parse_paddle_json(data: &[u8], page: usize) -> Result<Vec<Detection>, OcrError> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| OcrError::InvalidInput(format!("not a valid OCR dump: {e}")))?;

    let items = match &value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) if items.is_empty() => return Ok(Vec::new()),
        Value::Array(items) if is_paged(items) => match items.get(page) {
            Some(Value::Array(detections)) => detections,
            Some(Value::Null) | None => {
                debug!(page, pages = items.len(), "page has no detections");
                return Ok(Vec::new());
            }
            Some(_) => {
                return Err(OcrError::InvalidInput(format!(
                    "page {page} is not a list of detections"
                )))
            }
        },
        Value::Array(items) => items,
        _ => {
            return Err(OcrError::InvalidInput(
                "expected a list of detections or pages".into(),
            ))
        }
    };

    Ok(items.iter().map(detection_from_value).collect())
}

// Paged when any entry holds detections. Otherwise a list that has any
// detection in it is bare, and what is left (`[null]`, `[[]]`) is empty pages.
fn is_paged(items: &[Value]) -> bool {
    let holds_detections = |entry: &Value| {
        entry
            .as_array()
            .is_some_and(|inner| inner.iter().any(is_detection))
    };
    if items.iter().any(holds_detections) {
        return true;
    }
    !items.iter().any(is_detection)
}

// `[quad, [text, confidence]]`. Either half being recognizable is enough so
// that a detection broken on one side is still classified as one.
fn is_detection(value: &Value) -> bool {
    let recognition = value
        .get(1)
        .and_then(|r| r.get(0))
        .is_some_and(|text| text.is_string() || text.is_null());
    let quad = value
        .get(0)
        .and_then(|quad| quad.get(0))
        .and_then(|point| point.get(0))
        .is_some_and(Value::is_number);
    value.is_array() && (recognition || quad)
}

fn detection_from_value(value: &Value) -> Detection {
    // Stop at the first unreadable point; a short quad gets rejected downstream.
    let points = value
        .get(0)
        .and_then(Value::as_array)
        .map(|quad| quad.iter().map_while(point_from_value).collect())
        .unwrap_or_default();

    let recognition = value.get(1);
    let text = recognition
        .and_then(|r| r.get(0))
        .and_then(Value::as_str)
        .map(str::to_owned);
    let confidence = recognition
        .and_then(|r| r.get(1))
        .and_then(Value::as_f64)
        .map(|c| c as f32);

    Detection {
        points,
        text,
        confidence,
    }
}

fn point_from_value(value: &Value) -> Option<Point> {
    let x = value.get(0)?.as_f64()?;
    let y = value.get(1)?.as_f64()?;
    Some(Point::new(x as f32, y as f32))
}
