mod error;
mod grammar;
mod tokenizer;

pub use error::ParseError;
pub use tokenizer::tokenize;

use crate::Tree;

/// Compile a rule string such as `age > 30 AND department = 'sales'` into a
/// [`Tree`].
///
/// # Errors
///
/// Returns [`ParseError`] if the text does not follow the rule grammar.
pub fn parse(input: &str) -> Result<Tree, ParseError> {
    let tokens = tokenize(input);
    let tree = grammar::parse_tokens(&tokens)?;
    tracing::debug!(
        tokens = tokens.len(),
        nodes = tree.node_count(),
        depth = tree.depth(),
        "parsed rule"
    );
    Ok(tree)
}
