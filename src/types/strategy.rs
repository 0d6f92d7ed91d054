use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CombineError;
use super::operator::Operator;

/// How several trees are merged into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strategy {
    /// Left-fold every tree under `AND`.
    And,
    /// Left-fold every tree under `OR`.
    Or,
    /// Group comparisons per field under `OR`, then fold the groups with the
    /// most frequent logical operator seen in the inputs.
    Optimize,
}

impl Strategy {
    /// The fold operator for the plain strategies.
    #[must_use]
    pub fn operator(self) -> Option<Operator> {
        match self {
            Strategy::And => Some(Operator::And),
            Strategy::Or => Some(Operator::Or),
            Strategy::Optimize => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::And => "AND",
            Strategy::Or => "OR",
            Strategy::Optimize => "OPTIMIZE",
        }
    }
}

impl FromStr for Strategy {
    type Err = CombineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Strategy::And),
            "OR" => Ok(Strategy::Or),
            "OPTIMIZE" => Ok(Strategy::Optimize),
            other => Err(CombineError::UnknownStrategy {
                strategy: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
