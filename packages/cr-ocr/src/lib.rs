//! OCR collaborator boundary for `cr-extract`.
//!
//! Engines hand back raw [`Detection`]s (a four point quad plus text) for one
//! image at a time. [`PaddleJsonEngine`] replays the JSON written out from a
//! PaddleOCR `ocr()` call so the extraction core can run without a model.

pub mod detection;
pub mod engine;
pub mod paddle;

pub use detection::{Detection, Point};
pub use engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
pub use paddle::{parse_paddle_json, PaddleJsonEngine};
