use ruletree::{parse, Record};

fn main() {
    let tree = parse("(age > 30 OR age < 18) AND department = 'sales'")
        .expect("failed to parse rule");

    println!("rule:  {tree}");
    println!(
        "tree:  {}",
        serde_json::to_string_pretty(&tree).expect("failed to serialize tree")
    );

    let records = [
        Record::new().set("age", 40).set("department", "sales"),
        Record::new().set("age", 25).set("department", "sales"),
        Record::new().set("age", 15).set("department", "marketing"),
    ];

    for record in &records {
        match tree.evaluate(record) {
            Ok(result) => println!("{record:?} -> {result}"),
            Err(e) => println!("{record:?} -> error: {e}"),
        }
    }

    // A field the record does not carry fails the evaluation outright.
    let err = tree.evaluate(&Record::new().set("age", 40)).unwrap_err();
    println!("missing field -> {err}");
}
