use std::fmt;

use serde::{Deserialize, Serialize};

/// Every operator token the rule language recognizes.
///
/// `AND`/`OR` combine subtrees at operator nodes; the rest compare a record
/// field against a literal at comparison leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
}

impl Operator {
    /// Recognize an operator from a whole token. Matching is exact and
    /// case-sensitive, so `and` is not an operator.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Operator> {
        match token {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            "=" => Some(Operator::Eq),
            ">=" => Some(Operator::Gte),
            "<=" => Some(Operator::Lte),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
        }
    }

    #[must_use]
    pub fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    /// Binding strength used to pick split points. Lower binds looser, so the
    /// weakest operator in a token run becomes the root of its subtree.
    #[must_use]
    pub fn precedence(self) -> u8 {
        if self.is_logical() {
            1
        } else {
            2
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
