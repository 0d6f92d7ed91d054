use crate::serial::json_kind;
use crate::{EvaluationError, Operator, Record, Tree, Value};

/// Evaluate a tree against a record.
///
/// Both sides of every operator node are evaluated before they are combined,
/// so an error anywhere in the tree fails the whole evaluation even when the
/// other side alone would decide the result. A missing child counts as `false`.
///
/// # Errors
///
/// Returns [`EvaluationError`] for a missing or non-logical operator on an
/// operator node, a logical operator on a comparison leaf, a field absent from
/// the record, a record value that is not a string or number, or an ordering
/// comparison between incompatible kinds.
pub fn evaluate(tree: &Tree, record: &Record) -> Result<bool, EvaluationError> {
    let result = eval_node(tree, record)?;
    tracing::debug!(result, nodes = tree.node_count(), "evaluated rule");
    Ok(result)
}

fn eval_node(tree: &Tree, record: &Record) -> Result<bool, EvaluationError> {
    match tree {
        Tree::Operator {
            operator,
            left,
            right,
        } => {
            let operator = operator.ok_or(EvaluationError::MissingOperator)?;
            let l = match left {
                Some(l) => eval_node(l, record)?,
                None => false,
            };
            let r = match right {
                Some(r) => eval_node(r, record)?,
                None => false,
            };
            match operator {
                Operator::And => Ok(l && r),
                Operator::Or => Ok(l || r),
                other => Err(EvaluationError::UnknownOperator {
                    operator: other,
                    position: "operator",
                }),
            }
        }
        Tree::Comparison {
            operator,
            field,
            value,
        } => eval_comparison(field, *operator, value, record),
    }
}

fn eval_comparison(
    field: &str,
    operator: Operator,
    literal: &Value,
    record: &Record,
) -> Result<bool, EvaluationError> {
    let raw = record
        .get(field)
        .ok_or_else(|| EvaluationError::FieldNotFound {
            field: field.to_owned(),
        })?;
    let actual = Value::from_json(raw).ok_or_else(|| EvaluationError::UnsupportedType {
        field: field.to_owned(),
        kind: json_kind(raw),
    })?;
    if operator.is_logical() {
        return Err(EvaluationError::UnknownOperator {
            operator,
            position: "comparison",
        });
    }

    let result = actual
        .compare(operator, literal)
        .ok_or_else(|| EvaluationError::TypeMismatch {
            field: field.to_owned(),
            operator,
            left: actual.kind(),
            right: literal.kind(),
        })?;
    tracing::trace!(field, %operator, result, "compared field");
    Ok(result)
}

impl Tree {
    /// Evaluate this tree against a record. See [`evaluate`](crate::evaluate()).
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when the tree cannot be evaluated against
    /// the record.
    pub fn evaluate(&self, record: &Record) -> Result<bool, EvaluationError> {
        evaluate(self, record)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{field, parse};

    fn sample_tree() -> Tree {
        parse("(age > 30 OR age < 18) AND department = 'sales'").unwrap()
    }

    #[test]
    fn eval_simple_true() {
        let tree = field("x").eq(1_i64);
        assert_eq!(evaluate(&tree, &Record::new().set("x", 1_i64)), Ok(true));
    }

    #[test]
    fn eval_simple_false() {
        let tree = field("x").eq(1_i64);
        assert_eq!(evaluate(&tree, &Record::new().set("x", 2_i64)), Ok(false));
    }

    #[test]
    fn eval_all_compare_ops() {
        let record = Record::new().set("x", 10_i64);

        let ops = vec![
            ("eq", field("x").eq(10_i64), true),
            ("gt", field("x").gt(5_i64), true),
            ("gte_eq", field("x").gte(10_i64), true),
            ("gte_gt", field("x").gte(11_i64), false),
            ("lt", field("x").lt(20_i64), true),
            ("lte_eq", field("x").lte(10_i64), true),
            ("lte_lt", field("x").lte(9_i64), false),
        ];

        for (name, tree, expected) in ops {
            assert_eq!(evaluate(&tree, &record), Ok(expected), "failed for {name}");
        }
    }

    #[test]
    fn eval_and_or_logic() {
        let record = Record::new().set("a", 1_i64).set("b", 2_i64);
        let t = field("a").eq(1_i64);
        let f = field("b").eq(999_i64);

        assert_eq!(evaluate(&t.clone().and(t.clone()), &record), Ok(true));
        assert_eq!(evaluate(&t.clone().and(f.clone()), &record), Ok(false));
        assert_eq!(evaluate(&f.clone().or(t.clone()), &record), Ok(true));
        assert_eq!(evaluate(&f.clone().or(f), &record), Ok(false));
    }

    #[test]
    fn eval_parsed_rule() {
        let tree = sample_tree();
        let record = Record::new()
            .set("age", 40_i64)
            .set("salary", 60000_i64)
            .set("department", "sales");
        assert_eq!(tree.evaluate(&record), Ok(true));

        let record = Record::new().set("age", 25_i64).set("department", "sales");
        assert_eq!(tree.evaluate(&record), Ok(false));
    }

    #[test]
    fn eval_int_float_cross_type() {
        let tree = field("score").eq(10.0_f64);
        assert_eq!(tree.evaluate(&Record::new().set("score", 10_i64)), Ok(true));
    }

    #[test]
    fn eval_missing_field() {
        let tree = field("salary").gt(1_i64);
        assert_eq!(
            tree.evaluate(&Record::new()),
            Err(EvaluationError::FieldNotFound {
                field: "salary".into()
            })
        );
    }

    #[test]
    fn eval_does_not_short_circuit() {
        let record = Record::new().set("a", 0_i64);
        let and = field("a").eq(1_i64).and(field("missing").eq(1_i64));
        assert!(matches!(
            and.evaluate(&record),
            Err(EvaluationError::FieldNotFound { .. })
        ));

        let record = Record::new().set("a", 1_i64);
        let or = field("a").eq(1_i64).or(field("missing").eq(1_i64));
        assert!(matches!(
            or.evaluate(&record),
            Err(EvaluationError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn eval_unsupported_record_types() {
        let tree = field("flag").eq(1_i64);
        for (value, kind) in [
            (json!(true), "boolean"),
            (json!(null), "null"),
            (json!([1]), "array"),
            (json!({"a": 1}), "object"),
        ] {
            let record = Record::new().set("flag", value);
            assert_eq!(
                tree.evaluate(&record),
                Err(EvaluationError::UnsupportedType {
                    field: "flag".into(),
                    kind
                })
            );
        }
    }

    #[test]
    fn eval_ordering_type_mismatch() {
        let tree = field("age").gt(30_i64);
        let record = Record::new().set("age", "forty");
        assert_eq!(
            tree.evaluate(&record),
            Err(EvaluationError::TypeMismatch {
                field: "age".into(),
                operator: Operator::Gt,
                left: "string",
                right: "integer",
            })
        );
    }

    #[test]
    fn eval_equality_type_mismatch_is_false() {
        let tree = field("age").eq(30_i64);
        assert_eq!(tree.evaluate(&Record::new().set("age", "30")), Ok(false));
    }

    #[test]
    fn eval_missing_operator() {
        let tree = Tree::Operator {
            operator: None,
            left: Some(Box::new(field("x").eq(1_i64))),
            right: Some(Box::new(field("x").eq(1_i64))),
        };
        assert_eq!(
            tree.evaluate(&Record::new().set("x", 1_i64)),
            Err(EvaluationError::MissingOperator)
        );
    }

    #[test]
    fn eval_comparison_operator_on_operator_node() {
        let tree = Tree::Operator {
            operator: Some(Operator::Gt),
            left: None,
            right: None,
        };
        assert_eq!(
            tree.evaluate(&Record::new()),
            Err(EvaluationError::UnknownOperator {
                operator: Operator::Gt,
                position: "operator"
            })
        );
    }

    #[test]
    fn eval_logical_operator_on_comparison_leaf() {
        let tree = Tree::Comparison {
            operator: Operator::Or,
            field: "x".into(),
            value: Value::Int(1),
        };
        assert_eq!(
            tree.evaluate(&Record::new().set("x", 1_i64)),
            Err(EvaluationError::UnknownOperator {
                operator: Operator::Or,
                position: "comparison"
            })
        );
    }

    #[test]
    fn eval_missing_children_are_false() {
        let leaf = field("x").eq(1_i64);
        let record = Record::new().set("x", 1_i64);

        let or_left_only = Tree::Operator {
            operator: Some(Operator::Or),
            left: Some(Box::new(leaf.clone())),
            right: None,
        };
        assert_eq!(or_left_only.evaluate(&record), Ok(true));

        let and_left_only = Tree::Operator {
            operator: Some(Operator::And),
            left: Some(Box::new(leaf)),
            right: None,
        };
        assert_eq!(and_left_only.evaluate(&record), Ok(false));
    }

    #[test]
    fn eval_string_ordering() {
        let tree = field("name").lt("m");
        assert_eq!(tree.evaluate(&Record::new().set("name", "alice")), Ok(true));
        assert_eq!(tree.evaluate(&Record::new().set("name", "zed")), Ok(false));
    }
}
