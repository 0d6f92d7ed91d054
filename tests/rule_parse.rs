use ruletree::{field, parse, tokenize, Operator, ParseError, Record, Tree, Value};

#[test]
fn parse_and_evaluate() {
    let tree = parse("age > 30 AND salary > 50000").unwrap();

    let Tree::Operator {
        operator: Some(Operator::And),
        left: Some(left),
        right: Some(right),
    } = &tree
    else {
        panic!("expected an AND node, got {tree:?}");
    };
    assert_eq!(**left, field("age").gt(30_i64));
    assert_eq!(**right, field("salary").gt(50000_i64));

    let record = Record::new()
        .set("age", 40_i64)
        .set("salary", 60000_i64)
        .set("department", "sales");
    assert!(tree.evaluate(&record).unwrap());

    let record = Record::new()
        .set("age", 40_i64)
        .set("salary", 10000_i64)
        .set("department", "sales");
    assert!(!tree.evaluate(&record).unwrap());
}

#[test]
fn parentheses_group_before_and() {
    let tree = parse("(age > 30 OR age < 18) AND department = 'sales'").unwrap();
    assert_eq!(tree.operator(), Some(Operator::And));

    let Tree::Operator {
        left: Some(left), ..
    } = &tree
    else {
        panic!("expected an operator node");
    };
    assert_eq!(
        **left,
        field("age").gt(30_i64).or(field("age").lt(18_i64))
    );

    let young = Record::new().set("age", 15_i64).set("department", "sales");
    let middle = Record::new().set("age", 25_i64).set("department", "sales");
    let wrong_dept = Record::new().set("age", 15_i64).set("department", "marketing");
    assert!(tree.evaluate(&young).unwrap());
    assert!(!tree.evaluate(&middle).unwrap());
    assert!(!tree.evaluate(&wrong_dept).unwrap());
}

#[test]
fn tokens_after_group_are_kept() {
    let tree = parse("(age > 30) AND salary > 1").unwrap();
    assert_eq!(tree, field("age").gt(30_i64).and(field("salary").gt(1_i64)));
}

#[test]
fn nested_groups() {
    let tree =
        parse("((age > 30 AND department = 'sales') OR (age < 25 AND department = 'marketing')) AND (salary > 50000 OR experience > 5)")
            .unwrap();
    assert_eq!(tree.depth(), 4);
    assert_eq!(
        tree.fields(),
        vec!["age", "department", "salary", "experience"]
    );

    let record = Record::new()
        .set("age", 35_i64)
        .set("department", "sales")
        .set("salary", 40000_i64)
        .set("experience", 8_i64);
    assert!(tree.evaluate(&record).unwrap());
}

#[test]
fn quoted_values_keep_inner_spaces() {
    let tree = parse("title = 'senior sales engineer'").unwrap();
    assert_eq!(tree, field("title").eq("senior sales engineer"));
    assert!(tree
        .evaluate(&Record::new().set("title", "senior sales engineer"))
        .unwrap());
}

#[test]
fn parentheses_without_spaces() {
    assert_eq!(
        tokenize("(age > 30)AND(x = 1)"),
        vec!["(", "age", ">", "30", ")", "AND", "(", "x", "=", "1", ")"]
    );
    assert_eq!(
        parse("(age > 30)AND(x = 1)").unwrap(),
        field("age").gt(30_i64).and(field("x").eq(1_i64))
    );
}

#[test]
fn numeric_literal_kinds() {
    let cases = [
        ("x = 7", Value::Int(7)),
        ("x = 7.25", Value::Float(7.25)),
        ("x = 7a", Value::String("7a".into())),
    ];
    for (text, expected) in cases {
        let Tree::Comparison { value, .. } = parse(text).unwrap() else {
            panic!("expected a comparison for {text}");
        };
        assert_eq!(value, expected, "failed for {text}");
    }
}

#[test]
fn unterminated_quote_fails_to_parse() {
    assert!(matches!(
        parse("department = 'sales"),
        Err(ParseError::InvalidComparison { .. })
    ));
}

#[test]
fn trailing_unterminated_quote_is_dropped() {
    assert_eq!(
        tokenize("x = 1 AND y = 2 'junk words"),
        vec!["x", "=", "1", "AND", "y", "=", "2"]
    );
    assert_eq!(
        parse("x = 1 AND y = 2 'junk words").unwrap(),
        field("x").eq(1_i64).and(field("y").eq(2_i64))
    );
}

#[test]
fn lowercase_logical_operator_is_not_an_operator() {
    assert!(parse("a = 1 and b = 2").is_err());
}

#[test]
fn error_messages() {
    assert_eq!(parse("").unwrap_err().to_string(), "empty expression");
    assert_eq!(
        parse("(a = 1").unwrap_err().to_string(),
        "mismatched parentheses"
    );
    assert_eq!(
        parse("age 30").unwrap_err().to_string(),
        "invalid comparison: age 30"
    );
}

#[test]
fn serialized_form_matches_parse() {
    let tree = parse("age >= 21 OR department = 'it'").unwrap();
    let json = tree.to_json().unwrap();
    assert_eq!(Tree::from_json(&json).unwrap(), tree);
}
