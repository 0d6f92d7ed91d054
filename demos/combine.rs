use ruletree::{combine, parse, simplify, Tree};

fn main() {
    let rules: Vec<Tree> = [
        "age > 30 AND department = 'sales'",
        "age < 25 AND department = 'marketing'",
        "salary > 50000 OR experience > 5",
    ]
    .iter()
    .map(|text| parse(text).expect("failed to parse rule"))
    .collect();

    for strategy in ["AND", "OR", "OPTIMIZE"] {
        let combined = combine(rules.clone(), strategy).expect("failed to combine rules");
        println!("{strategy:>8}: {combined}");
        println!(
            "          depth {}, {} nodes",
            combined.depth(),
            combined.node_count()
        );
    }

    let nested = parse("(a = 1 AND b = 2) AND (c = 3 AND d = 4)").expect("failed to parse rule");
    println!("\nbefore simplify: {nested}");
    println!(" after simplify: {}", simplify(nested));
}
