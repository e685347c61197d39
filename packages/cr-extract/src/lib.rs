//! # cr-extract
//!
//! Pulls structured fields (registration number, chassis number, owners, ...)
//! out of the OCR tokens of a photographed vehicle registration book.
//!
//! ## How it works
//!
//! - **Normalization**: raw detections are reduced to `(text, mid_y)` tokens
//!   sorted top to bottom; malformed detections are set aside, not fatal.
//! - **Label location**: each field's label is found by fuzzy partial matching,
//!   topmost hit first.
//! - **Banding**: values are the tokens on the label's line (`same_line`) or
//!   everything below it (`next_line`), in reading order.
//! - **Ordinal selection**: the configured position(s) are picked from the band;
//!   anything missing is `None`.
//!
//! ## Quick Start
//!
//! ```
//! use cr_extract::prelude::*;
//!
//! let detections = vec![
//!     Detection::from_span("Registration No.", 10.0, 5.0, 180.0, 15.0),
//!     Detection::from_span("ABC-1234", 10.0, 25.0, 120.0, 35.0),
//! ];
//! let normalized = normalize(&detections);
//!
//! let extractor = FieldExtractor::new(ExtractorConfig::default());
//! let result = extractor.extract_all(&normalized.tokens, &default_field_specs());
//!
//! assert_eq!(
//!     result.get("Registration No."),
//!     Some(&FieldValue::Single(Some("ABC-1234".to_string())))
//! );
//! ```

pub mod config;
pub mod extractor;
pub mod field_spec;
pub mod form_state;
pub mod geometry;
pub mod report;
pub mod similarity;

// Re-export commonly used types at the root level
pub use config::{AppConfig, ConfigError};
pub use extractor::{
    ExtractionResult, ExtractorConfig, FieldExtractor, FieldValue, LabelMatch, DEFAULT_BAND_TOLERANCE,
    DEFAULT_FUZZ_THRESHOLD,
};
pub use field_spec::{default_field_specs, BandMode, FieldSpec, ValuePositions};
pub use form_state::{FormState, FORM_LABELS};
pub use geometry::{normalize, MalformedDetection, Normalized, OrderedTokenSequence, RecognizedToken};
pub use report::{ExtractionReport, RejectedDetection};
pub use similarity::{partial_ratio, PartialRatio, StringSimilarity};

pub use cr_ocr::{Detection, Point};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use cr_extract::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        default_field_specs, normalize, partial_ratio, AppConfig, BandMode, Detection, ExtractionResult,
        ExtractorConfig, FieldExtractor, FieldSpec, FieldValue, FormState, MalformedDetection, Normalized,
        OrderedTokenSequence, PartialRatio, Point, RecognizedToken, StringSimilarity, ValuePositions,
    };
}
