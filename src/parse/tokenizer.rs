use winnow::combinator::{alt, preceded, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

// -- Raw lexing ---------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')'
}

/// A parenthesis on its own, or a maximal run of anything else that is not
/// whitespace. Equivalent to padding every parenthesis with spaces and
/// splitting on whitespace.
fn raw_token<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((one_of(['(', ')']).take(), take_while(1.., is_word_char))).parse_next(input)
}

fn raw_tokens<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    let tokens: Vec<&str> = repeat(0.., preceded(ws, raw_token)).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(tokens)
}

// -- Quoted literal reassembly -------------------------------------------------

/// Re-join single-quoted literals that whitespace splitting broke apart.
///
/// A token that both starts and ends with `'` is already complete. A token that
/// only starts with `'` opens a pending literal that collects tokens until one
/// ending with `'` closes it. An unterminated literal is discarded.
fn join_quoted(raw: Vec<&str>) -> Vec<String> {
    let mut tokens = Vec::with_capacity(raw.len());
    let mut pending: Vec<&str> = Vec::new();
    let mut in_string = false;

    for token in raw {
        if token.starts_with('\'') && token.ends_with('\'') {
            tokens.push(token.to_owned());
        } else if token.starts_with('\'') {
            in_string = true;
            pending.push(token);
        } else if token.ends_with('\'') {
            in_string = false;
            pending.push(token);
            tokens.push(pending.join(" "));
            pending.clear();
        } else if in_string {
            pending.push(token);
        } else {
            tokens.push(token.to_owned());
        }
    }

    if !pending.is_empty() {
        tracing::trace!(dropped = pending.len(), "discarding unterminated quoted literal");
    }

    tokens
}

/// Split a rule string into tokens. Never fails; malformed text surfaces as a
/// parse error later.
///
/// An unterminated quoted literal is dropped along with every token after its
/// opening quote. This only shows up as a parse error when it leaves a
/// comparison short, so `x = 1 'junk` parses as `x = 1`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut input = text;
    // Every character is whitespace, a parenthesis or a word character, so the
    // lexer always consumes the whole input.
    let raw = raw_tokens.parse_next(&mut input).unwrap_or_default();
    join_quoted(raw)
}
