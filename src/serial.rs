//! Conversion between [`Tree`](crate::Tree) and the nested-map form used at
//! system boundaries.
//!
//! ## Shape
//!
//! ```text
//! {
//!   "type":     "operator" | "comparison",
//!   "operator": "AND" | "OR" | ">" | "<" | "=" | ">=" | "<=" | null,
//!   "field":    string | null,
//!   "value":    string | integer | float | null,
//!   "left":     { ...same shape... },   // only when present
//!   "right":    { ...same shape... }    // only when present
//! }
//! ```
//!
//! All four scalar keys are always written, with `null` where they do not
//! apply to the node kind. On input, missing keys and `null` are equivalent.
//!
//! Operator nodes decode leniently (no operator, or a comparison operator, is
//! accepted and reported later by the evaluator). Comparison nodes must carry a
//! comparison operator, a field and a value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::types::{Operator, Tree, Value};

/// Errors produced when decoding the nested-map form.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid serialized tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("comparison node is missing '{key}'")]
    MissingKey { key: &'static str },

    #[error("comparison node cannot use logical operator '{operator}'")]
    LogicalComparison { operator: Operator },
}

// ---------------------------------------------------------------------------
// Serialized type hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKind {
    Operator,
    Comparison,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedNode {
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    operator: Option<Operator>,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left: Option<Box<SerializedNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right: Option<Box<SerializedNode>>,
}

// ---------------------------------------------------------------------------
// Tree conversion
// ---------------------------------------------------------------------------

fn serialize_node(tree: &Tree) -> SerializedNode {
    match tree {
        Tree::Operator {
            operator,
            left,
            right,
        } => SerializedNode {
            kind: NodeKind::Operator,
            operator: *operator,
            field: None,
            value: None,
            left: left.as_deref().map(|l| Box::new(serialize_node(l))),
            right: right.as_deref().map(|r| Box::new(serialize_node(r))),
        },
        Tree::Comparison {
            operator,
            field,
            value,
        } => SerializedNode {
            kind: NodeKind::Comparison,
            operator: Some(*operator),
            field: Some(field.clone()),
            value: Some(value.clone()),
            left: None,
            right: None,
        },
    }
}

fn deserialize_node(node: SerializedNode) -> Result<Tree, FormatError> {
    match node.kind {
        NodeKind::Operator => {
            let left = node.left.map(|l| deserialize_node(*l)).transpose()?;
            let right = node.right.map(|r| deserialize_node(*r)).transpose()?;
            Ok(Tree::Operator {
                operator: node.operator,
                left: left.map(Box::new),
                right: right.map(Box::new),
            })
        }
        NodeKind::Comparison => {
            let operator = node
                .operator
                .ok_or(FormatError::MissingKey { key: "operator" })?;
            if operator.is_logical() {
                return Err(FormatError::LogicalComparison { operator });
            }
            let field = node.field.ok_or(FormatError::MissingKey { key: "field" })?;
            let value = node.value.ok_or(FormatError::MissingKey { key: "value" })?;
            Ok(Tree::Comparison {
                operator,
                field,
                value,
            })
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_node(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let node = SerializedNode::deserialize(deserializer)?;
        deserialize_node(node).map_err(serde::de::Error::custom)
    }
}

impl Tree {
    /// Render this tree in the nested-map form.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if serde_json rejects the tree.
    pub fn to_value(&self) -> Result<serde_json::Value, FormatError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Render this tree as a JSON string in the nested-map form.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if serde_json rejects the tree.
    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rehydrate a tree from the nested-map form.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the value is not an object or does not
    /// describe a tree.
    pub fn from_value(value: serde_json::Value) -> Result<Tree, FormatError> {
        if !value.is_object() {
            return Err(FormatError::NotAnObject {
                kind: json_kind(&value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Rehydrate a tree from a JSON string in the nested-map form.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the text is not valid JSON or does not
    /// describe a tree.
    pub fn from_json(json: &str) -> Result<Tree, FormatError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
