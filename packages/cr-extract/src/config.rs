//! Runtime configuration loaded from a JSON file.
//!
//! Every key is optional:
//!
//! ```json
//! {
//!   "extractor": { "fuzz_threshold": 80, "band_tolerance": 10.0, "exclude_label_token": false },
//!   "fields": [ { "label": "Make", "band": "next_line", "value_at": 0 } ]
//! }
//! ```
//!
//! Without `fields` the built-in CR book table is used.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::extractor::ExtractorConfig;
use crate::field_spec::{default_field_specs, FieldSpec, ValuePositions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("fuzz_threshold must be between 0 and 100, got {0}")]
    FuzzThreshold(u8),
    #[error("band_tolerance must be a finite, non-negative number of pixels, got {0}")]
    BandTolerance(f32),
    #[error("field #{0} has an empty label")]
    EmptyLabel(usize),
    #[error("field '{0}' lists no value positions")]
    NoPositions(String),
    #[error("field '{0}' is configured more than once")]
    DuplicateLabel(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extractor: ExtractorConfig,
    /// Replaces the built-in field table when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldSpec>>,
}

impl AppConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let extractor = &self.extractor;
        if extractor.fuzz_threshold > 100 {
            return Err(ConfigError::FuzzThreshold(extractor.fuzz_threshold));
        }
        if !extractor.band_tolerance.is_finite() || extractor.band_tolerance < 0.0 {
            return Err(ConfigError::BandTolerance(extractor.band_tolerance));
        }

        let Some(fields) = &self.fields else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        for (index, spec) in fields.iter().enumerate() {
            if spec.label.trim().is_empty() {
                return Err(ConfigError::EmptyLabel(index));
            }
            if matches!(&spec.positions, ValuePositions::Multi(p) if p.is_empty()) {
                return Err(ConfigError::NoPositions(spec.label.clone()));
            }
            if !seen.insert(spec.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(spec.label.clone()));
            }
        }
        Ok(())
    }

    /// The active field table.
    pub fn field_specs(&self) -> Vec<FieldSpec> {
        self.fields.clone().unwrap_or_else(default_field_specs)
    }
}
