//! Token geometry normalization.
//!
//! Turns raw OCR detections into tokens that only remember their text and
//! vertical midpoint, ordered top to bottom.

use cr_ocr::Detection;
use thiserror::Error;
use tracing::warn;

/// One recognized text fragment reduced to what banding needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedToken {
    pub text: String,
    pub top_left_y: f32,
    pub bottom_right_y: f32,
}

impl RecognizedToken {
    pub fn new(text: impl Into<String>, top_left_y: f32, bottom_right_y: f32) -> Self {
        Self {
            text: text.into(),
            top_left_y,
            bottom_right_y,
        }
    }

    /// Token whose box is collapsed onto a single vertical midpoint.
    pub fn at(text: impl Into<String>, mid_y: f32) -> Self {
        Self::new(text, mid_y, mid_y)
    }

    pub fn mid_y(&self) -> f32 {
        (self.top_left_y + self.bottom_right_y) / 2.0
    }
}

/// Why a detection could not become a token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedDetection {
    #[error("detection {index} has {points} corner points, expected 4")]
    TooFewPoints { index: usize, points: usize },
    #[error("detection {index} has no recognized text")]
    MissingText { index: usize },
}

impl MalformedDetection {
    /// Position of the offending detection in the engine's output.
    pub fn index(&self) -> usize {
        match self {
            Self::TooFewPoints { index, .. } | Self::MissingText { index } => *index,
        }
    }
}

/// Tokens sorted ascending by vertical midpoint.
///
/// Equal midpoints keep the order in which the tokens were supplied. The
/// sequence is never mutated once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedTokenSequence {
    tokens: Vec<RecognizedToken>,
}

impl OrderedTokenSequence {
    pub fn new(mut tokens: Vec<RecognizedToken>) -> Self {
        // `sort_by` is stable, so ties stay in detection order.
        tokens.sort_by(|a, b| a.mid_y().total_cmp(&b.mid_y()));
        Self { tokens }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecognizedToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[RecognizedToken] {
        &self.tokens
    }
}

impl FromIterator<RecognizedToken> for OrderedTokenSequence {
    fn from_iter<I: IntoIterator<Item = RecognizedToken>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OrderedTokenSequence {
    type Item = &'a RecognizedToken;
    type IntoIter = std::slice::Iter<'a, RecognizedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Output of [`normalize`]: the usable tokens plus whatever was thrown out.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub tokens: OrderedTokenSequence,
    pub rejected: Vec<MalformedDetection>,
}

/// Converts a single detection, reading only its top-left and bottom-right corners.
pub fn token_from_detection(
    index: usize,
    detection: &Detection,
) -> Result<RecognizedToken, MalformedDetection> {
    if detection.points.len() < 4 {
        return Err(MalformedDetection::TooFewPoints {
            index,
            points: detection.points.len(),
        });
    }
    let text = detection
        .text
        .as_ref()
        .ok_or(MalformedDetection::MissingText { index })?;

    Ok(RecognizedToken::new(
        text.clone(),
        detection.points[0].y,
        detection.points[2].y,
    ))
}

/// Builds the ordered token sequence for one image.
///
/// Malformed detections are left out and reported back; they never abort
/// normalization of the rest.
pub fn normalize(detections: &[Detection]) -> Normalized {
    let mut tokens = Vec::with_capacity(detections.len());
    let mut rejected = Vec::new();

    for (index, detection) in detections.iter().enumerate() {
        match token_from_detection(index, detection) {
            Ok(token) => tokens.push(token),
            Err(err) => {
                warn!(%err, "skipping malformed detection");
                rejected.push(err);
            }
        }
    }

    Normalized {
        tokens: OrderedTokenSequence::new(tokens),
        rejected,
    }
}
