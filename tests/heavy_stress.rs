#![cfg(feature = "heavy")]
use gauge_stack::catalogs::CatalogKind;
use gauge_stack::{Catalog, SearchEngineBuilder, SearchOutcome};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Sum of a random subset of `catalog`, so the target is known to be reachable.
fn reachable_target(rng: &mut StdRng, catalog: &Catalog) -> Option<f64> {
    let picks: Vec<f64> = catalog.iter().filter(|_| rng.gen_bool(0.2)).collect();
    (!picks.is_empty()).then(|| picks.iter().sum())
}

#[test]
fn heavy_stress_reference_sets() {
    let mut rng = StdRng::seed_from_u64(123);
    let engine = SearchEngineBuilder::new().with_node_limit(5_000_000).build();
    for kind in CatalogKind::ALL {
        let catalog = kind.catalog();
        let (mut searched, mut aborted) = (0u32, 0u32);
        for _ in 0..300 {
            let Some(target) = reachable_target(&mut rng, &catalog) else {
                continue;
            };
            searched += 1;
            match engine.search(target, &catalog).unwrap() {
                SearchOutcome::Found(stack) => {
                    assert!((stack.sum() - target).abs() < engine.tolerance().value());
                }
                // Reachable, so only the budget can stop the search.
                SearchOutcome::Aborted(_) => aborted += 1,
                SearchOutcome::NotFound => panic!("{kind}: {target} is reachable"),
            }
        }
        assert!(
            aborted * 2 < searched,
            "{kind}: {aborted} of {searched} searches hit the node limit"
        );
    }
}

#[test]
fn heavy_stress_fine_grid_targets() {
    let engine = SearchEngineBuilder::new().with_node_limit(100_000).build();
    let catalog = CatalogKind::Ideal.catalog();
    let mut found = 0;
    for step in 1..=2_000 {
        let target = step as f64 * 0.05;
        if engine.search(target, &catalog).unwrap().is_found() {
            found += 1;
        }
    }
    assert!(found > 0);
}
