use thiserror::Error;

/// Errors produced when compiling a rule string into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("invalid comparison: {tokens}")]
    InvalidComparison { tokens: String },

    #[error("unknown operator '{token}'")]
    UnknownOperator { token: String },

    #[error("integer literal out of range: {literal}")]
    IntegerOutOfRange { literal: String },

    #[error("float literal out of range: {literal}")]
    FloatOutOfRange { literal: String },
}
