//! Pre-parse checks on rule strings and records, and rule string formatting.

use thiserror::Error;

use crate::types::AttributeKind;
use crate::Record;

const COMPARISON_TOKENS: [&str; 6] = [">", "<", ">=", "<=", "=", "!="];
const LOGICAL_TOKENS: [&str; 2] = ["AND", "OR"];

/// Errors produced by the validation helpers and the attribute catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rule string must be non-empty")]
    Empty,

    #[error("rule string contains invalid character '{character}'")]
    InvalidCharacter { character: char },

    #[error("mismatched parentheses in rule string")]
    UnbalancedParentheses,

    #[error("operator '{operator}' has nothing on one side")]
    MisplacedOperator { operator: String },

    #[error("missing required attributes: {}", attributes.join(", "))]
    MissingAttributes { attributes: Vec<String> },

    #[error("unsupported attribute: {attribute}")]
    UnsupportedAttribute { attribute: String },

    #[error("invalid type for {attribute}: expected {expected}, got {found}")]
    InvalidAttributeType {
        attribute: String,
        expected: AttributeKind,
        found: &'static str,
    },
}

fn is_rule_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || "_().<>=!'".contains(c)
}

/// Cheap syntax screening before a rule string reaches the parser.
///
/// Rejects empty input, characters outside the rule alphabet, unbalanced
/// parentheses, and an operator as the first or last whitespace-separated word.
/// Passing this check does not guarantee the string parses.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, in the order listed above.
pub fn validate_rule_string(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if let Some(character) = text.chars().find(|&c| !is_rule_char(c)) {
        return Err(ValidationError::InvalidCharacter { character });
    }

    let mut depth = 0_usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ValidationError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ValidationError::UnbalancedParentheses);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    for word in [words.first(), words.last()].into_iter().flatten() {
        if COMPARISON_TOKENS.contains(word) || LOGICAL_TOKENS.contains(word) {
            return Err(ValidationError::MisplacedOperator {
                operator: (*word).to_owned(),
            });
        }
    }
    Ok(())
}

/// Check that every required attribute is present in the record.
///
/// # Errors
///
/// Returns [`ValidationError::MissingAttributes`] listing the absent names in
/// sorted order.
pub fn validate_attributes<I>(record: &Record, required: I) -> Result<(), ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut missing: Vec<String> = required
        .into_iter()
        .filter(|name| !record.contains(name.as_ref()))
        .map(|name| name.as_ref().to_owned())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    missing.dedup();
    Err(ValidationError::MissingAttributes {
        attributes: missing,
    })
}

/// Normalize spacing in a rule string.
///
/// Runs of whitespace collapse to one space, and every parenthesis and
/// comparison operator gets one space on each side. `>=`, `<=` and `!=` are
/// kept together.
#[must_use]
pub fn format_rule_string(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() * 2);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '(' | ')' | '=' => {
                padded.push(' ');
                padded.push(c);
                padded.push(' ');
            }
            '>' | '<' | '!' => {
                let paired = chars.next_if_eq(&'=').is_some();
                if c == '!' && !paired {
                    padded.push(c);
                    continue;
                }
                padded.push(' ');
                padded.push(c);
                if paired {
                    padded.push('=');
                }
                padded.push(' ');
            }
            _ => padded.push(c),
        }
    }

    padded.split_whitespace().collect::<Vec<_>>().join(" ")
}
