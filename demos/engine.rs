use ruletree::{AttributeCatalog, Engine, Record};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ruletree=debug")),
        )
        .init();

    let engine = Engine::builder()
        .max_nested_depth(6)
        .attributes(AttributeCatalog::default())
        .build();

    let rule = engine
        .compile("(age > 30 AND department = 'sales') OR salary >= 75000.5")
        .expect("failed to compile rule");
    println!(
        "{}",
        serde_json::to_string_pretty(&rule.to_value().expect("failed to serialize"))
            .expect("failed to render")
    );

    let record = Record::new()
        .set("age", 28)
        .set("department", "engineering")
        .set("salary", 80000);
    println!("eligible: {:?}", engine.evaluate(&rule, &record));

    // `age` must be an integer in the default catalog.
    let bad = Record::new()
        .set("age", 28.5)
        .set("department", "sales")
        .set("salary", 1);
    println!("wrong type: {:?}", engine.evaluate(&rule, &bad));

    // Rejected before parsing by the syntax screen.
    println!("bad rule: {:?}", engine.compile("age > 30 AND"));

    let combined = engine
        .combine(
            vec![
                engine.compile("age > 50").expect("failed to compile rule"),
                engine.compile("age < 20").expect("failed to compile rule"),
                engine.compile("department = 'sales'").expect("failed to compile rule"),
            ],
            "OPTIMIZE",
        )
        .expect("failed to combine rules");
    println!(
        "{}",
        serde_json::to_string_pretty(&combined).expect("failed to render")
    );
}
