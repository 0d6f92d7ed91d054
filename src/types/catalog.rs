use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::serial::json_kind;
use crate::validate::ValidationError;

/// The scalar kind an attribute is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Integer,
    String,
    /// Integer or float.
    Number,
}

impl AttributeKind {
    fn accepts(self, value: &serde_json::Value) -> bool {
        match self {
            // Unsigned values past i64::MAX evaluate as floats.
            Self::Integer => value.is_i64(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// Maps attribute names to the kind of value they must hold.
///
/// Used by [`Engine`](crate::Engine) to type-check record attributes before a
/// rule is evaluated. Serializes as a plain `{"name": "kind"}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeCatalog {
    kinds: BTreeMap<String, AttributeKind>,
}

impl AttributeCatalog {
    /// An empty catalog. Every attribute is unsupported until registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// Register an attribute, replacing any previous kind for that name.
    #[must_use]
    pub fn with(mut self, name: &str, kind: AttributeKind) -> Self {
        self.kinds.insert(name.to_owned(), kind);
        self
    }

    /// Look up the expected kind for an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<AttributeKind> {
        self.kinds.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterate over all registered (name, kind) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AttributeKind)> {
        self.kinds.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Check that `value` is an acceptable value for attribute `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedAttribute`] when the name is not
    /// registered and [`ValidationError::InvalidAttributeType`] when the value
    /// has the wrong kind.
    pub fn validate(&self, name: &str, value: &serde_json::Value) -> Result<(), ValidationError> {
        let expected = self
            .get(name)
            .ok_or_else(|| ValidationError::UnsupportedAttribute {
                attribute: name.to_owned(),
            })?;
        if expected.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::InvalidAttributeType {
                attribute: name.to_owned(),
                expected,
                found: json_kind(value),
            })
        }
    }
}

impl Default for AttributeCatalog {
    /// The employee attributes the engine ships with: `age` (integer),
    /// `department` (string), `salary`, `experience` and `spend` (numbers).
    fn default() -> Self {
        Self::new()
            .with("age", AttributeKind::Integer)
            .with("department", AttributeKind::String)
            .with("salary", AttributeKind::Number)
            .with("experience", AttributeKind::Number)
            .with("spend", AttributeKind::Number)
    }
}

impl FromIterator<(String, AttributeKind)> for AttributeCatalog {
    fn from_iter<I: IntoIterator<Item = (String, AttributeKind)>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}
