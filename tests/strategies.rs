#![allow(dead_code)]

use proptest::prelude::*;
use ruletree::{field, Record, Tree};

// --- Fixed field schema ---
// age        : i64 (0..=120)
// salary     : f64, whole amounts plus one half (0.5..=200000.5)
// department : string, one of DEPARTMENTS
// region     : string, one of REGIONS (some contain a space)

pub const DEPARTMENTS: &[&str] = &["sales", "marketing", "engineering", "support"];
pub const REGIONS: &[&str] = &["north", "south", "east coast", "west coast"];

/// Generate a record that aligns with the fixed field schema.
pub fn arb_record() -> impl Strategy<Value = Record> {
    (
        0_i64..=120,
        0_u32..=200_000,
        prop::sample::select(DEPARTMENTS),
        prop::sample::select(REGIONS),
    )
        .prop_map(|(age, salary, department, region)| {
            Record::new()
                .set("age", age)
                .set("salary", f64::from(salary) + 0.5)
                .set("department", department)
                .set("region", region)
        })
}

/// Generate a comparison leaf on a random field from the schema.
pub fn arb_leaf() -> impl Strategy<Value = Tree> {
    prop_oneof![
        (0_i64..=120, 0_u8..5).prop_map(|(val, op)| {
            let f = field("age");
            match op {
                0 => f.eq(val),
                1 => f.gt(val),
                2 => f.gte(val),
                3 => f.lt(val),
                _ => f.lte(val),
            }
        }),
        (0_u32..=200_000, prop::bool::ANY).prop_map(|(val, above)| {
            let amount = f64::from(val) + 0.5;
            if above {
                field("salary").gt(amount)
            } else {
                field("salary").lte(amount)
            }
        }),
        prop::sample::select(DEPARTMENTS).prop_map(|d| field("department").eq(d)),
        prop::sample::select(REGIONS).prop_map(|r| field("region").eq(r)),
    ]
}

/// Generate a tree of AND/OR nodes over schema leaves, bounded depth.
pub fn arb_tree(max_depth: u32) -> impl Strategy<Value = Tree> {
    arb_leaf().prop_recursive(max_depth, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner).prop_map(|(a, b)| a.or(b)),
        ]
    })
}

/// Generate 2..=6 independent trees for combination.
pub fn arb_trees() -> impl Strategy<Value = Vec<Tree>> {
    prop::collection::vec(arb_tree(2), 2..=6)
}

/// Generate 2..=8 comparison leaves only.
pub fn arb_leaves() -> impl Strategy<Value = Vec<Tree>> {
    prop::collection::vec(arb_leaf(), 2..=8)
}
