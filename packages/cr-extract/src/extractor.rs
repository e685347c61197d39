//! Field extraction over an ordered token sequence.
//!
//! For every [`FieldSpec`] the extractor finds the topmost token that fuzzily
//! matches the label, gathers the tokens in the label's band (or every token
//! below it) in reading order, and picks the configured ordinal(s). Fields are
//! independent of each other and nothing is kept between calls.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::field_spec::{BandMode, FieldSpec, ValuePositions};
use crate::geometry::{OrderedTokenSequence, RecognizedToken};
use crate::similarity::{PartialRatio, StringSimilarity};

pub const DEFAULT_FUZZ_THRESHOLD: u8 = 80;
pub const DEFAULT_BAND_TOLERANCE: f32 = 10.0;

/// Tunables shared by every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum partial similarity (0..=100) for a token to count as the label.
    pub fuzz_threshold: u8,
    /// Maximum vertical distance in pixels for two tokens to share a line.
    pub band_tolerance: f32,
    /// Leave the label token itself out of a same-line band.
    pub exclude_label_token: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fuzz_threshold: DEFAULT_FUZZ_THRESHOLD,
            band_tolerance: DEFAULT_BAND_TOLERANCE,
            exclude_label_token: false,
        }
    }
}

/// Extracted value(s) for one field, shaped like its [`ValuePositions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(Option<String>),
    Multi(Vec<Option<String>>),
}

impl FieldValue {
    /// The all-absent value for the given positions.
    pub fn absent(positions: &ValuePositions) -> Self {
        match positions {
            ValuePositions::Single(_) => FieldValue::Single(None),
            ValuePositions::Multi(positions) => FieldValue::Multi(vec![None; positions.len()]),
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_none(),
            FieldValue::Multi(values) => values.iter().all(Option::is_none),
        }
    }

    /// Text for an editable form field. Absent positions are dropped and
    /// multiple values go on separate lines.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Single(value) => value.clone().unwrap_or_default(),
            FieldValue::Multi(values) => values
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Field name to value, in field table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    fields: Vec<(String, FieldValue)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `name`, keeping its first position.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The token chosen as a field's label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMatch<'a> {
    /// Position of the token in the ordered sequence.
    pub index: usize,
    pub token: &'a RecognizedToken,
    pub score: u8,
}

impl LabelMatch<'_> {
    pub fn mid_y(&self) -> f32 {
        self.token.mid_y()
    }
}

pub struct FieldExtractor<S = PartialRatio> {
    config: ExtractorConfig,
    similarity: S,
}

impl FieldExtractor<PartialRatio> {
    pub fn new(config: ExtractorConfig) -> Self {
        Self::with_similarity(config, PartialRatio)
    }
}

impl Default for FieldExtractor<PartialRatio> {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl<S: StringSimilarity> FieldExtractor<S> {
    pub fn with_similarity(config: ExtractorConfig, similarity: S) -> Self {
        Self { config, similarity }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Finds the topmost token scoring at least the threshold against `label`.
    ///
    /// Whitespace is stripped from the label before scoring. The first hit in
    /// reading order wins even if a later token would score higher.
    pub fn locate_label<'a>(
        &self,
        tokens: &'a OrderedTokenSequence,
        label: &str,
    ) -> Option<LabelMatch<'a>> {
        let needle: String = label.chars().filter(|c| !c.is_whitespace()).collect();

        tokens.iter().enumerate().find_map(|(index, token)| {
            let score = self.similarity.score(&needle, &token.text);
            (score >= self.config.fuzz_threshold).then_some(LabelMatch {
                index,
                token,
                score,
            })
        })
    }

    /// Texts of the tokens in the label's band, top to bottom.
    ///
    /// A same-line band includes the label token itself unless
    /// `exclude_label_token` is set.
    pub fn collect_band<'a>(
        &self,
        tokens: &'a OrderedTokenSequence,
        label: &LabelMatch<'_>,
        band: BandMode,
    ) -> Vec<&'a str> {
        let key_mid_y = label.mid_y();
        let tolerance = self.config.band_tolerance;

        tokens
            .iter()
            .enumerate()
            .filter(|(index, _)| !(self.config.exclude_label_token && *index == label.index))
            .filter(|(_, token)| match band {
                BandMode::SameLine => (token.mid_y() - key_mid_y).abs() <= tolerance,
                BandMode::NextLine => token.mid_y() > key_mid_y + tolerance,
            })
            .map(|(_, token)| token.text.as_str())
            .collect()
    }

    /// Extracts one field. Never fails: a missing label or an ordinal past the
    /// end of the band comes back as `None` for the affected positions.
    pub fn extract_field(&self, tokens: &OrderedTokenSequence, spec: &FieldSpec) -> FieldValue {
        let Some(label) = self.locate_label(tokens, &spec.label) else {
            debug!(label = %spec.label, "no token matched label");
            return FieldValue::absent(&spec.positions);
        };

        debug!(
            label = %spec.label,
            matched = %label.token.text,
            score = label.score,
            mid_y = label.mid_y(),
            "label located"
        );

        let values = self.collect_band(tokens, &label, spec.band);
        let select = |position: usize| -> Option<String> {
            let value = values.get(position).map(|text| text.to_string());
            if value.is_none() {
                debug!(
                    label = %spec.label,
                    position,
                    available = values.len(),
                    "value position out of range"
                );
            }
            value
        };

        match &spec.positions {
            ValuePositions::Single(position) => FieldValue::Single(select(*position)),
            ValuePositions::Multi(positions) => {
                FieldValue::Multi(positions.iter().map(|&position| select(position)).collect())
            }
        }
    }

    /// Runs every spec against the same tokens.
    pub fn extract_all(&self, tokens: &OrderedTokenSequence, specs: &[FieldSpec]) -> ExtractionResult {
        let mut result = ExtractionResult::new();
        for spec in specs {
            result.insert(spec.label.clone(), self.extract_field(tokens, spec));
        }
        result
    }
}
