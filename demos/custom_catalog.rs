//! Example: a user-supplied catalog with duplicate pieces and a node budget.
//!
//! Run with:
//! `cargo run --example custom_catalog`
//!
//! With `--features parallel`, the batch at the end runs on the rayon pool.

use gauge_stack::{input::parse_catalog, ByPosition, SearchEngineBuilder, SearchOutcome};

const WORKSHOP_SET: &str = "
# two 2 mm pieces in this drawer
25; 10; 5
2 2 1.5
1.005 1.0
";

fn main() {
    let catalog = parse_catalog(WORKSHOP_SET).expect("catalog is well formed");
    println!("{} blocks, {:.3} mm in total\n", catalog.len(), catalog.total());

    // Default keying: equal lengths share one slot, so 4 = 2 + 2 is refused.
    let by_value = SearchEngineBuilder::new().with_node_limit(100_000).build();
    // Position keying: each physical piece is usable once.
    let by_position = SearchEngineBuilder::new()
        .with_node_limit(100_000)
        .keyed_by::<ByPosition>()
        .build();

    for target in [4.0, 5.5] {
        for (name, outcome) in [
            (by_value.usage_key(), by_value.search(target, &catalog)),
            (by_position.usage_key(), by_position.search(target, &catalog)),
        ] {
            match outcome {
                Ok(SearchOutcome::Found(stack)) => {
                    println!("{target} mm by {name}: {:?}", stack.blocks())
                }
                Ok(other) => println!("{target} mm by {name}: {}", other.label()),
                Err(err) => println!("{target} mm by {name}: {err}"),
            }
        }
    }

    println!();
    let targets: Vec<f64> = (1..=8).map(|i| i as f64 * 5.25).collect();
    for (target, outcome) in targets.iter().zip(by_value.search_many(&targets, &catalog)) {
        let label = outcome.map(|o| o.label()).unwrap_or("invalid");
        println!("{target:>6.2} mm -> {label}");
    }
}
