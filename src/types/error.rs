use thiserror::Error;

use super::operator::Operator;

/// Errors raised while evaluating a tree against a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("operator node must have an operator")]
    MissingOperator,

    #[error("unknown operator '{operator}' in {position} node")]
    UnknownOperator {
        operator: Operator,
        position: &'static str,
    },

    #[error("field not found in data: {field}")]
    FieldNotFound { field: String },

    #[error("unsupported data type {kind} for field {field}")]
    UnsupportedType { field: String, kind: &'static str },

    #[error("cannot compare {left} {operator} {right} for field {field}")]
    TypeMismatch {
        field: String,
        operator: Operator,
        left: &'static str,
        right: &'static str,
    },
}

/// Errors raised when merging trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    #[error("no rules to combine")]
    NoRules,

    #[error("unknown combination strategy: {strategy}")]
    UnknownStrategy { strategy: String },
}

/// Input rejected by one of the engine's configured limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("rule string is {length} characters long, limit is {max}")]
    RuleTooLong { length: usize, max: usize },

    #[error("rule is nested {depth} levels deep, limit is {max}")]
    TooDeep { depth: usize, max: usize },

    #[error("{count} rules given, at most {max} can be combined")]
    TooManyRules { count: usize, max: usize },
}
