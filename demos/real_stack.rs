//! Example: stacking calibrated gauge blocks and reporting the deviation.
//!
//! Run with:
//! `cargo run --example real_stack`
//!
//! The calibrated set is slightly off nominal, so a stack only has to land
//! within the tolerance (0.005 mm by default).

use gauge_stack::{catalogs::CatalogKind, input::parse_target, SearchEngine, SearchReport};

fn main() {
    let kind = CatalogKind::Real;
    let catalog = kind.catalog();
    let engine = SearchEngine::new();

    // Comma decimals are accepted, as typed on a German keyboard.
    for text in ["41,3", "6", "1.0", "87.654"] {
        let target = parse_target(text).expect("example targets parse");
        let (outcome, _) = engine.run(target, &catalog);
        let report = SearchReport::new(target, &outcome).with_deviation(kind.reports_deviation());
        println!("{report}\n");
    }
}
