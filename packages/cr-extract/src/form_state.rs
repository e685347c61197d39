//! Review form contents, owned by the caller.
//!
//! The extractor never keeps state. Whatever drives the review form holds a
//! [`FormState`], feeds extraction results into it, and lets a reviewer
//! correct individual fields before submitting.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::extractor::ExtractionResult;

/// Labels shown on the review form, in display order.
///
/// "Country of Origin" has no extraction rule and always starts blank.
pub const FORM_LABELS: [&str; 15] = [
    "Registration No.",
    "Chassis No.",
    "Current Owner/Address/ID.No.",
    "Conditions/Special Notes",
    "Absolute Owner",
    "Engine No",
    "Cylinder Capacity (cc)",
    "Class of Vehicle",
    "Taxation Class",
    "Status when Registered",
    "Make",
    "Country of Origin",
    "Model",
    "Wheel Base",
    "Type of Body",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<(String, String)>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_labels(FORM_LABELS)
    }
}

impl FormState {
    /// A blank form with the given labels.
    pub fn with_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            fields: labels.into_iter().map(|l| (l.into(), String::new())).collect(),
        }
    }

    /// Overwrites form fields with freshly extracted values.
    ///
    /// Absent values blank the field. Results for labels the form does not
    /// show are ignored.
    pub fn apply(mut self, result: &ExtractionResult) -> Self {
        for (name, value) in result.iter() {
            if let Some(slot) = self.slot_mut(name) {
                *slot = value.render();
            }
        }
        self
    }

    /// Records a reviewer's correction. Returns `false` for an unknown label.
    pub fn set(&mut self, label: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(label) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn slot_mut(&mut self, label: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value)
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
