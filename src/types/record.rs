use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::serial::FormatError;

/// Flat evaluation input mapping field names to JSON values.
///
/// Any JSON value can be stored; the evaluator only accepts strings and
/// numbers and reports every other kind as an unsupported type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    data: HashMap<String, serde_json::Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    #[must_use]
    pub fn set(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.insert(field, value.into());
        self
    }

    /// Insert a field value (mutable reference version).
    pub fn insert(&mut self, field: &str, value: serde_json::Value) {
        self.data.insert(field.to_owned(), value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a record from an already-parsed JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::NotAnObject`] for any other JSON kind.
    pub fn from_value(value: serde_json::Value) -> Result<Self, FormatError> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(FormatError::NotAnObject {
                kind: crate::serial::json_kind(&other),
            }),
        }
    }
}

impl FromIterator<(String, serde_json::Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
