use gauge_stack::{
    search, ByPosition, Catalog, SearchEngine, SearchEngineBuilder, SearchOutcome, Tolerance,
};

fn small() -> Catalog {
    Catalog::new(vec![5.0, 3.0, 2.0, 1.0]).unwrap()
}

fn blocks_of(outcome: SearchOutcome) -> Vec<f64> {
    outcome
        .into_combination()
        .map(|c| c.into_blocks())
        .unwrap_or_default()
}

#[test]
fn six_takes_five_then_one() {
    let outcome = search(6.0, &small()).unwrap();
    assert_eq!(blocks_of(outcome), vec![5.0, 1.0]);
}

#[test]
fn eleven_takes_everything() {
    let outcome = search(11.0, &small()).unwrap();
    let stack = outcome.combination().unwrap();
    assert_eq!(stack.blocks(), &[5.0, 3.0, 2.0, 1.0]);
    assert_eq!(stack.positions(), &[0, 1, 2, 3]);
    assert_eq!(stack.sum(), 11.0);
    assert_eq!(stack.deviation(), 0.0);
}

#[test]
fn half_is_below_every_block() {
    assert_eq!(search(0.5, &small()).unwrap(), SearchOutcome::NotFound);
}

#[test]
fn near_miss_within_tolerance_is_accepted() {
    let catalog = Catalog::new(vec![5.0]).unwrap();
    let outcome = search(5.003, &catalog).unwrap();
    let stack = outcome.combination().unwrap();
    assert_eq!(stack.blocks(), &[5.0]);
    assert!((stack.deviation() + 0.003).abs() < 1e-12);
}

#[test]
fn target_below_tolerance_is_matched_by_nothing() {
    // 0.001 would land within 0.005 of 0.003, but the empty stack already does.
    let catalog = Catalog::new(vec![1.0, 0.001]).unwrap();
    assert_eq!(search(0.003, &catalog).unwrap(), SearchOutcome::NotFound);
    assert_eq!(
        search(0.004999, &Catalog::new(vec![0.005]).unwrap()).unwrap(),
        SearchOutcome::NotFound
    );
}

#[test]
fn empty_catalog_never_matches() {
    for target in [0.001, 1.0, 5.0, 1e6] {
        assert_eq!(
            search(target, &Catalog::empty()).unwrap(),
            SearchOutcome::NotFound
        );
    }
}

#[test]
fn exact_tolerance_boundary_is_rejected_from_both_sides() {
    // Powers of two keep these sums exact.
    let half = SearchEngineBuilder::new()
        .with_tolerance(Tolerance::new(0.5).unwrap())
        .build();
    let one = Catalog::new(vec![1.0]).unwrap();
    let two = Catalog::new(vec![2.0]).unwrap();

    // |1.0 - 1.5| == 0.5: short by exactly ε.
    assert_eq!(half.search(1.5, &one).unwrap(), SearchOutcome::NotFound);
    // |2.0 - 1.5| == 0.5: long by exactly ε, then pruned.
    assert_eq!(half.search(1.5, &two).unwrap(), SearchOutcome::NotFound);
    // Just inside the boundary on either side.
    assert!(half.search(1.25, &one).unwrap().is_found());
    assert!(half.search(1.75, &two).unwrap().is_found());
}

#[test]
fn looser_tolerance_stops_earlier() {
    let catalog = small();
    let loose = SearchEngineBuilder::new()
        .with_tolerance(Tolerance::new(1.5).unwrap())
        .build();
    // [5] is already within 1.5 of 6.
    assert_eq!(blocks_of(loose.search(6.0, &catalog).unwrap()), vec![5.0]);
}

#[test]
fn stricter_tolerance_rejects_near_misses() {
    let catalog = Catalog::new(vec![5.0]).unwrap();
    let strict = SearchEngineBuilder::new()
        .with_tolerance(Tolerance::new(1e-9).unwrap())
        .build();
    assert_eq!(strict.search(5.003, &catalog).unwrap(), SearchOutcome::NotFound);
    assert!(strict.search(5.0, &catalog).unwrap().is_found());
}

#[test]
fn first_match_is_not_the_shortest() {
    // 4 = 3 + 1 is found before the single block 4 further down the list.
    let catalog = Catalog::new(vec![3.0, 1.0, 4.0]).unwrap();
    assert_eq!(blocks_of(search(4.0, &catalog).unwrap()), vec![3.0, 1.0]);
}

#[test]
fn duplicate_lengths_share_one_slot_by_default() {
    let catalog = Catalog::new(vec![2.0, 2.0, 1.0]).unwrap();
    assert_eq!(search(4.0, &catalog).unwrap(), SearchOutcome::NotFound);
    assert_eq!(search(5.0, &catalog).unwrap(), SearchOutcome::NotFound);
    assert_eq!(blocks_of(search(3.0, &catalog).unwrap()), vec![2.0, 1.0]);

    let by_position = SearchEngineBuilder::new().keyed_by::<ByPosition>().build();
    assert_eq!(
        blocks_of(by_position.search(5.0, &catalog).unwrap()),
        vec![2.0, 2.0, 1.0]
    );
}

#[test]
fn caller_catalog_is_untouched() {
    let catalog = small();
    let before = catalog.clone();
    let engine = SearchEngine::new();
    for target in [6.0, 0.5, 11.0, 7.5] {
        let _ = engine.search(target, &catalog).unwrap();
    }
    assert_eq!(catalog, before);
}

#[test]
fn invalid_targets_are_rejected_before_search() {
    let catalog = small();
    for bad in [0.0, -0.0, -6.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(search(bad, &catalog).is_err(), "{bad} was searched");
    }
}
