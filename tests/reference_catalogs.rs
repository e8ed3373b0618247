use gauge_stack::catalogs::CatalogKind;
use gauge_stack::input::parse_target;
use gauge_stack::{SearchEngine, SearchOutcome, SearchReport, DEFAULT_TOLERANCE};

fn stack(kind: CatalogKind, target: f64) -> Vec<f64> {
    SearchEngine::new()
        .search(target, &kind.catalog())
        .unwrap()
        .into_combination()
        .map(|c| c.into_blocks())
        .unwrap_or_default()
}

#[test]
fn ideal_set_examples() {
    assert_eq!(stack(CatalogKind::Ideal, 41.3), vec![30.0, 10.0, 1.3]);
    assert_eq!(stack(CatalogKind::Ideal, 100.0), vec![50.0, 30.0, 20.0]);
    assert_eq!(stack(CatalogKind::Ideal, 6.0), vec![6.0]);
}

#[test]
fn real_set_lands_within_tolerance() {
    let blocks = stack(CatalogKind::Real, 41.3);
    assert_eq!(blocks, vec![30.00025, 10.00012, 1.29970]);
    let sum: f64 = blocks.iter().sum();
    assert!((sum - 41.3).abs() < DEFAULT_TOLERANCE);
    assert_eq!(stack(CatalogKind::Real, 6.0), vec![5.99988]);
}

#[test]
fn real_set_takes_first_match_not_closest() {
    // 1.00472 is listed before 0.99990 and is already within 0.005 of 1.0.
    assert_eq!(stack(CatalogKind::Real, 1.0), vec![1.00472]);
}

#[test]
fn out_of_range_targets() {
    let engine = SearchEngine::new();
    for kind in CatalogKind::ALL {
        let catalog = kind.catalog();
        assert_eq!(engine.search(0.5, &catalog).unwrap(), SearchOutcome::NotFound);
        let (outcome, stats) = engine.search_with_stats(500.0, &catalog).unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(stats.nodes, 0, "{kind}: whole-set bound should reject");
    }
}

#[test]
fn whole_set_stacks_in_catalog_order() {
    for kind in CatalogKind::ALL {
        let catalog = kind.catalog();
        let (outcome, stats) = SearchEngine::new()
            .search_with_stats(catalog.total(), &catalog)
            .unwrap();
        let found = outcome.combination().unwrap();
        assert_eq!(found.len(), 32);
        assert_eq!(found.blocks(), catalog.blocks());
        assert_eq!(stats.nodes, 33);
    }
}

#[test]
fn typed_target_to_report() {
    let target = parse_target("41,3").unwrap();
    let kind = CatalogKind::Real;
    let outcome = SearchEngine::new().run(target, &kind.catalog()).0;
    let text = SearchReport::new(target, &outcome)
        .with_deviation(kind.reports_deviation())
        .to_string();
    assert!(text.starts_with("Exact length of 41.3 mm:\n\n30.00025 mm\n10.00012 mm\n 1.29970 mm\n"));
    assert!(text.contains("Number of gauge blocks: 3\n"));
    assert!(text.contains("Sum (real): 41.30007 mm\n"));
    assert!(text.ends_with("Deviation: 0.00007 mm"));
}
