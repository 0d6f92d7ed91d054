use winnow::ascii::{digit0, digit1};
use winnow::combinator::alt;
use winnow::error::ModalResult;
use winnow::prelude::*;

use crate::{Operator, Tree, Value};

use super::ParseError;

// -- Literals -----------------------------------------------------------------

fn integer_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    digit1.parse_next(input)
}

fn float_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    // Exactly one decimal point with at least one digit somewhere
    alt(((digit1, '.', digit0).take(), ('.', digit1).take())).parse_next(input)
}

/// Coerce a value token: quoted text becomes a string without its quotes,
/// digits become an integer, digits with one decimal point become a float,
/// anything else is kept as a raw string.
fn literal(token: &str) -> Result<Value, ParseError> {
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return Ok(Value::String(token[1..token.len() - 1].to_owned()));
    }
    if let Ok(digits) = integer_literal.parse(token) {
        return digits
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ParseError::IntegerOutOfRange {
                literal: token.to_owned(),
            });
    }
    if let Ok(number) = float_literal.parse(token) {
        if let Ok(f) = number.parse::<f64>() {
            // Non-finite floats have no serialized form.
            if !f.is_finite() {
                return Err(ParseError::FloatOutOfRange {
                    literal: token.to_owned(),
                });
            }
            return Ok(Value::Float(f));
        }
    }
    Ok(Value::String(token.to_owned()))
}

// -- Structure ----------------------------------------------------------------

/// Index of the `)` matching the `(` at position 0.
fn matching_close(tokens: &[String]) -> Result<usize, ParseError> {
    let mut depth = 0_usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::MismatchedParentheses)
}

/// Find the first operator token with the lowest precedence outside any
/// parentheses. Ties go to the earliest occurrence.
fn weakest_operator(tokens: &[String]) -> Result<Option<(usize, Operator)>, ParseError> {
    let mut depth = 0_usize;
    let mut best: Option<(usize, Operator)> = None;

    for (i, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" => depth += 1,
            ")" => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ParseError::MismatchedParentheses)?;
            }
            other if depth == 0 => {
                if let Some(op) = Operator::from_token(other) {
                    if best.map_or(true, |(_, b)| op.precedence() < b.precedence()) {
                        best = Some((i, op));
                    }
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::MismatchedParentheses);
    }
    Ok(best)
}

fn comparison(tokens: &[String]) -> Result<Tree, ParseError> {
    let [field, op, value] = tokens else {
        return Err(ParseError::InvalidComparison {
            tokens: tokens.join(" "),
        });
    };
    let operator = Operator::from_token(op)
        .filter(|o| !o.is_logical())
        .ok_or_else(|| ParseError::UnknownOperator { token: op.clone() })?;
    if Operator::from_token(field).is_some() || Operator::from_token(value).is_some() {
        return Err(ParseError::InvalidComparison {
            tokens: tokens.join(" "),
        });
    }

    Ok(Tree::Comparison {
        operator,
        field: field.clone(),
        value: literal(value)?,
    })
}

/// Build a tree from a token slice by splitting at the weakest-binding logical
/// operator and recursing on both sides.
pub(super) fn parse_tokens(tokens: &[String]) -> Result<Tree, ParseError> {
    let Some(first) = tokens.first() else {
        return Err(ParseError::EmptyExpression);
    };

    if first == "(" {
        let close = matching_close(tokens)?;
        if close == tokens.len() - 1 {
            return parse_tokens(&tokens[1..close]);
        }
    }

    match weakest_operator(tokens)? {
        Some((index, operator)) if operator.is_logical() => {
            tracing::trace!(index, %operator, "splitting at logical operator");
            let left = parse_tokens(&tokens[..index])?;
            let right = parse_tokens(&tokens[index + 1..])?;
            Ok(Tree::node(operator, left, right))
        }
        _ => comparison(tokens),
    }
}
