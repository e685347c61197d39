//! The field table: which labels to look for and where their values sit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a field's values sit relative to its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandMode {
    /// Tokens within the band tolerance of the label's midpoint.
    SameLine,
    /// Every token strictly below the label's band.
    NextLine,
}

impl fmt::Display for BandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandMode::SameLine => write!(f, "same_line"),
            BandMode::NextLine => write!(f, "next_line"),
        }
    }
}

/// Ordinal(s) into the collected value tokens.
///
/// In JSON a bare integer is [`ValuePositions::Single`] and a list is
/// [`ValuePositions::Multi`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValuePositions {
    Single(usize),
    Multi(Vec<usize>),
}

impl fmt::Display for ValuePositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuePositions::Single(position) => write!(f, "{position}"),
            ValuePositions::Multi(positions) => {
                let joined = positions
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{joined}]")
            }
        }
    }
}

/// One configured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Label text as printed on the document; also the field's name in results.
    pub label: String,
    pub band: BandMode,
    #[serde(rename = "value_at")]
    pub positions: ValuePositions,
}

impl FieldSpec {
    pub fn single(label: impl Into<String>, band: BandMode, position: usize) -> Self {
        Self {
            label: label.into(),
            band,
            positions: ValuePositions::Single(position),
        }
    }

    pub fn multi(label: impl Into<String>, band: BandMode, positions: Vec<usize>) -> Self {
        Self {
            label: label.into(),
            band,
            positions: ValuePositions::Multi(positions),
        }
    }
}

/// Field table for the certificate of registration ("CR book") page.
pub fn default_field_specs() -> Vec<FieldSpec> {
    use BandMode::NextLine;

    vec![
        FieldSpec::single("Registration No.", NextLine, 0),
        FieldSpec::single("Chassis No.", NextLine, 1),
        FieldSpec::multi("Current Owner/Address/ID.No.", NextLine, vec![0, 1]),
        FieldSpec::single("Conditions/Special Notes", NextLine, 0),
        FieldSpec::multi("Absolute Owner", NextLine, vec![0, 1, 2]),
        FieldSpec::single("Engine No", NextLine, 0),
        FieldSpec::single("Cylinder Capacity (cc)", NextLine, 1),
        FieldSpec::single("Class of Vehicle", NextLine, 0),
        FieldSpec::single("Taxation Class", NextLine, 1),
        FieldSpec::single("Status when Registered", NextLine, 0),
        FieldSpec::single("Make", NextLine, 0),
        // "Country of Origin" is not extracted; it only appears on the form.
        FieldSpec::single("Model", NextLine, 1),
        FieldSpec::single("Wheel Base", NextLine, 0),
        FieldSpec::single("Type of Body", NextLine, 0),
    ]
}
