//! Parse textual rules such as `(age > 30 OR age < 18) AND department = 'sales'`
//! into trees, evaluate them against flat records, and merge several trees into
//! one.
//!
//! ```
//! use ruletree::{combine, parse, Record};
//!
//! let seniors = parse("age > 60").unwrap();
//! let sales = parse("department = 'sales'").unwrap();
//! let rule = combine(vec![seniors, sales], "AND").unwrap();
//!
//! let record = Record::new().set("age", 64).set("department", "sales");
//! assert!(rule.evaluate(&record).unwrap());
//! ```

mod combine;
mod error;
mod evaluate;
pub mod parse;
pub mod serial;
mod types;
pub mod validate;

pub use combine::{combine, combine_with, simplify};
pub use error::RuleEngineError;
pub use evaluate::evaluate;
pub use parse::{parse, tokenize, ParseError};
pub use serial::FormatError;
pub use types::{
    field, AttributeCatalog, AttributeKind, Combination, CombineError, Engine, EngineBuilder,
    EngineConfig, EvaluationError, FieldRef, LimitError, Operator, Record, Strategy, Tree, Value,
};
pub use validate::{format_rule_string, validate_attributes, validate_rule_string, ValidationError};
