//! Example: stacking nominal gauge blocks for a handful of lengths.
//!
//! Run with:
//! `cargo run --example ideal_stack`

use gauge_stack::{catalogs::CatalogKind, SearchEngine, SearchReport, Target};

fn main() {
    let catalog = CatalogKind::Ideal.catalog();
    let engine = SearchEngine::new();

    for length in [41.3, 100.0, 6.0, 12.345, 0.5] {
        let target = Target::new(length).expect("example targets are positive");
        let (outcome, stats) = engine.run(target, &catalog);

        println!("{}", SearchReport::new(target, &outcome));
        println!("({} nodes, {} pruned)\n", stats.nodes, stats.pruned);
    }
}
