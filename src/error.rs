use thiserror::Error;

use crate::parse::ParseError;
use crate::serial::FormatError;
use crate::validate::ValidationError;
use crate::{CombineError, EvaluationError, LimitError};

/// Unified error type covering every stage an [`Engine`](crate::Engine) runs.
///
/// The free functions ([`parse`](crate::parse()), [`evaluate`](crate::evaluate()),
/// [`combine`](crate::combine())) return their own narrower error types.
#[derive(Debug, Error)]
pub enum RuleEngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Combine(#[from] CombineError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Limit(#[from] LimitError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
