/// A pixel coordinate as reported by the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One raw OCR detection: a quadrilateral, the recognized text and a score.
///
/// Points are expected in top-left, top-right, bottom-right, bottom-left
/// order. Nothing is validated here; a detection may carry fewer than four
/// points or no text at all, and it is up to the consumer to reject it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub points: Vec<Point>,
    pub text: Option<String>,
    pub confidence: Option<f32>,
}

impl Detection {
    pub fn new(points: Vec<Point>, text: impl Into<String>) -> Self {
        Self {
            points,
            text: Some(text.into()),
            confidence: None,
        }
    }

    /// Axis-aligned quad spanning `top` to `bottom`, handy for tests and fixtures.
    pub fn from_span(text: impl Into<String>, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            vec![
                Point::new(left, top),
                Point::new(right, top),
                Point::new(right, bottom),
                Point::new(left, bottom),
            ],
            text,
        )
    }
}
