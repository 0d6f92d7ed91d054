mod catalog;
mod engine;
mod error;
mod operator;
mod record;
mod strategy;
mod tree;
mod value;

pub use catalog::{AttributeCatalog, AttributeKind};
pub use engine::{Combination, Engine, EngineBuilder, EngineConfig};
pub use error::{CombineError, EvaluationError, LimitError};
pub use operator::Operator;
pub use record::Record;
pub use strategy::Strategy;
pub use tree::{field, FieldRef, Tree};
pub use value::Value;
