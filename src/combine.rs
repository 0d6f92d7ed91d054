use std::collections::HashSet;
use std::ptr;

use crate::{CombineError, Operator, Strategy, Tree};

/// Merge several trees into one under the strategy named by `strategy`
/// (`AND`, `OR` or `OPTIMIZE`).
///
/// A single tree is returned unchanged whatever the strategy token says.
///
/// # Errors
///
/// Returns [`CombineError::NoRules`] for an empty list and
/// [`CombineError::UnknownStrategy`] for an unrecognized token.
pub fn combine(mut trees: Vec<Tree>, strategy: &str) -> Result<Tree, CombineError> {
    if trees.len() == 1 {
        if let Some(only) = trees.pop() {
            return Ok(only);
        }
    }
    if trees.is_empty() {
        return Err(CombineError::NoRules);
    }
    combine_with(trees, strategy.parse()?)
}

/// Merge several trees into one under an already-parsed [`Strategy`].
///
/// # Errors
///
/// Returns [`CombineError::NoRules`] for an empty list.
pub fn combine_with(mut trees: Vec<Tree>, strategy: Strategy) -> Result<Tree, CombineError> {
    if trees.len() == 1 {
        if let Some(only) = trees.pop() {
            return Ok(only);
        }
    }
    let inputs = trees.len();
    let combined = match strategy.operator() {
        Some(operator) => fold(trees, Some(operator)),
        None => optimize(&trees),
    }
    .ok_or(CombineError::NoRules)?;

    tracing::debug!(
        %strategy,
        inputs,
        nodes = combined.node_count(),
        depth = combined.depth(),
        "combined rules"
    );
    Ok(combined)
}

/// Left-fold nodes pairwise: `((n0 op n1) op n2) op n3 ...`.
fn fold(nodes: impl IntoIterator<Item = Tree>, operator: Option<Operator>) -> Option<Tree> {
    let mut iter = nodes.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, node| Tree::Operator {
        operator,
        left: Some(Box::new(acc)),
        right: Some(Box::new(node)),
    }))
}

// -- OPTIMIZE -----------------------------------------------------------------

/// Statistics gathered over every input tree.
#[derive(Default)]
struct Analysis<'a> {
    /// Logical operators in first-seen order with their frequencies.
    operator_counts: Vec<(Operator, usize)>,
    /// Comparison leaves grouped by field, fields in first-seen order.
    groups: Vec<(&'a str, Vec<&'a Tree>)>,
}

impl<'a> Analysis<'a> {
    fn collect(trees: &'a [Tree]) -> Self {
        let mut analysis = Self::default();
        for tree in trees {
            // Children are owned, so a node is only ever reached once per tree.
            // The visited set still guards against aliased subtrees.
            let mut visited = HashSet::new();
            analysis.visit(tree, &mut visited);
        }
        analysis
    }

    fn visit(&mut self, node: &'a Tree, visited: &mut HashSet<*const Tree>) {
        if !visited.insert(ptr::from_ref(node)) {
            return;
        }
        match node {
            Tree::Operator {
                operator,
                left,
                right,
            } => {
                if let Some(op) = *operator {
                    if op.is_logical() {
                        self.count(op);
                    }
                }
                if let Some(l) = left {
                    self.visit(l, visited);
                }
                if let Some(r) = right {
                    self.visit(r, visited);
                }
            }
            Tree::Comparison { field, .. } if !field.is_empty() => {
                match self.groups.iter_mut().find(|(f, _)| *f == field.as_str()) {
                    Some((_, leaves)) => leaves.push(node),
                    None => self.groups.push((field.as_str(), vec![node])),
                }
            }
            Tree::Comparison { .. } => {}
        }
    }

    fn count(&mut self, operator: Operator) {
        match self.operator_counts.iter_mut().find(|(op, _)| *op == operator) {
            Some((_, n)) => *n += 1,
            None => self.operator_counts.push((operator, 1)),
        }
    }

    /// The most frequent logical operator; ties go to the one seen first.
    fn dominant_operator(&self) -> Option<Operator> {
        let mut best: Option<(Operator, usize)> = None;
        for &(op, n) in &self.operator_counts {
            if best.map_or(true, |(_, top)| n > top) {
                best = Some((op, n));
            }
        }
        best.map(|(op, _)| op)
    }

    fn is_grouped(&self, tree: &Tree) -> bool {
        self.groups
            .iter()
            .flat_map(|(_, leaves)| leaves)
            .any(|leaf| ptr::eq(*leaf, tree))
    }
}

/// Group comparisons on the same field under `OR`, keep every input that is
/// not itself a grouped leaf as a whole branch, then fold everything with the
/// dominant logical operator (`AND` when none was seen).
fn optimize(trees: &[Tree]) -> Option<Tree> {
    let analysis = Analysis::collect(trees);
    let mut nodes = Vec::new();

    for (field, leaves) in &analysis.groups {
        if leaves.len() > 1 {
            tracing::trace!(field, leaves = leaves.len(), "grouping comparisons under OR");
            nodes.extend(fold(leaves.iter().map(|&leaf| leaf.clone()), Some(Operator::Or)));
        } else {
            nodes.extend(leaves.iter().map(|&leaf| leaf.clone()));
        }
    }

    // Compound inputs are never grouped themselves, so they pass through whole.
    nodes.extend(
        trees
            .iter()
            .filter(|tree| !analysis.is_grouped(tree))
            .cloned(),
    );

    let operator = analysis.dominant_operator().unwrap_or(Operator::And);
    fold(nodes, Some(operator))
}

// -- Simplification -------------------------------------------------------------

/// Normalize nesting of repeated same-operator chains.
///
/// Children are simplified first. Whenever a node's left child is an operator
/// node with the same operator, the whole same-operator chain below it (through
/// both left and right children) is collected and rebuilt as a left fold. Right
/// nesting alone is left as it is.
#[must_use]
pub fn simplify(tree: Tree) -> Tree {
    match tree {
        Tree::Operator {
            operator,
            left,
            right,
        } => {
            let left = left.map(|l| Box::new(simplify(*l)));
            let right = right.map(|r| Box::new(simplify(*r)));
            let same_on_left = matches!(
                left.as_deref(),
                Some(Tree::Operator { operator: inner, .. }) if *inner == operator
            );
            let node = Tree::Operator {
                operator,
                left,
                right,
            };
            if !same_on_left {
                return node;
            }

            let mut chain = Vec::new();
            collect_chain(node, operator, &mut chain);
            fold(chain, operator).unwrap_or(Tree::Operator {
                operator,
                left: None,
                right: None,
            })
        }
        leaf @ Tree::Comparison { .. } => leaf,
    }
}

fn collect_chain(tree: Tree, operator: Option<Operator>, out: &mut Vec<Tree>) {
    match tree {
        Tree::Operator {
            operator: op,
            left,
            right,
        } if op == operator => {
            for child in [left, right].into_iter().flatten() {
                collect_chain(*child, operator, out);
            }
        }
        other => out.push(other),
    }
}
