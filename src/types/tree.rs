use std::fmt;

use super::operator::Operator;
use super::value::Value;

/// A compiled rule: a binary expression tree over comparison leaves.
///
/// Trees own their children exclusively. Operator nodes produced by the parser
/// always have both children and a logical operator, but the model also admits
/// the looser shapes found in stored trees (a missing child, a missing or
/// non-logical operator); the evaluator reports those at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Operator {
        operator: Option<Operator>,
        left: Option<Box<Tree>>,
        right: Option<Box<Tree>>,
    },
    Comparison {
        operator: Operator,
        field: String,
        value: Value,
    },
}

impl Tree {
    /// Build an operator node with both children present.
    #[must_use]
    pub fn node(operator: Operator, left: Tree, right: Tree) -> Tree {
        Tree::Operator {
            operator: Some(operator),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    #[must_use]
    pub fn comparison(field: &str, operator: Operator, value: impl Into<Value>) -> Tree {
        Tree::Comparison {
            operator,
            field: field.to_owned(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn and(self, other: Tree) -> Tree {
        Tree::node(Operator::And, self, other)
    }

    #[must_use]
    pub fn or(self, other: Tree) -> Tree {
        Tree::node(Operator::Or, self, other)
    }

    #[must_use]
    pub fn is_comparison(&self) -> bool {
        matches!(self, Tree::Comparison { .. })
    }

    /// The operator stored on this node, if any.
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Tree::Operator { operator, .. } => *operator,
            Tree::Comparison { operator, .. } => Some(*operator),
        }
    }

    /// Maximum nesting depth. A lone leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Tree::Comparison { .. } => 1,
            Tree::Operator { left, right, .. } => {
                let l = left.as_deref().map_or(0, Tree::depth);
                let r = right.as_deref().map_or(0, Tree::depth);
                l.max(r) + 1
            }
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Tree::Comparison { .. } => 1,
            Tree::Operator { left, right, .. } => {
                1 + left.as_deref().map_or(0, Tree::node_count)
                    + right.as_deref().map_or(0, Tree::node_count)
            }
        }
    }

    /// Field names referenced by comparison leaves, in first-seen order
    /// (pre-order, left before right), without duplicates.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_fields(self, &mut out);
        out
    }
}

fn collect_fields<'a>(tree: &'a Tree, out: &mut Vec<&'a str>) {
    match tree {
        Tree::Comparison { field, .. } => {
            if !out.contains(&field.as_str()) {
                out.push(field);
            }
        }
        Tree::Operator { left, right, .. } => {
            if let Some(l) = left {
                collect_fields(l, out);
            }
            if let Some(r) = right {
                collect_fields(r, out);
            }
        }
    }
}

/// Renders the tree as a fully parenthesised rule string. Trees produced by
/// the parser render to text that parses back to the same tree.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Comparison {
                operator,
                field,
                value,
            } => write!(f, "{field} {operator} {value}"),
            Tree::Operator {
                operator,
                left,
                right,
            } => {
                f.write_str("(")?;
                match left {
                    Some(l) => write!(f, "{l}")?,
                    None => f.write_str("_")?,
                }
                match operator {
                    Some(op) => write!(f, " {op} ")?,
                    None => f.write_str(" ? ")?,
                }
                match right {
                    Some(r) => write!(f, "{r}")?,
                    None => f.write_str("_")?,
                }
                f.write_str(")")
            }
        }
    }
}

/// Intermediate builder for comparison leaves.
/// Created by [`field()`]; requires a comparison method to produce a [`Tree`].
#[derive(Debug, Clone)]
pub struct FieldRef {
    name: String,
}

impl FieldRef {
    fn leaf(self, operator: Operator, value: impl Into<Value>) -> Tree {
        Tree::Comparison {
            operator,
            field: self.name,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Tree {
        self.leaf(Operator::Eq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Tree {
        self.leaf(Operator::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Tree {
        self.leaf(Operator::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Tree {
        self.leaf(Operator::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Tree {
        self.leaf(Operator::Lte, value)
    }
}

#[must_use]
pub fn field(name: &str) -> FieldRef {
    FieldRef {
        name: name.to_owned(),
    }
}
