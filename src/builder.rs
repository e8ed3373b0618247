use std::marker::PhantomData;

use crate::budget::SearchBudget;
use crate::traits::{ByValue, UsageKey};
use crate::utils::Tolerance;
use crate::SearchEngine;

/// Step-by-step configuration of a [`SearchEngine`].
///
/// ```
/// use gauge_stack::{ByPosition, SearchEngineBuilder, Tolerance};
///
/// let engine = SearchEngineBuilder::new()
///     .with_tolerance(Tolerance::new(1e-9).unwrap())
///     .with_node_limit(1_000_000)
///     .keyed_by::<ByPosition>()
///     .build();
/// assert_eq!(engine.usage_key(), "position");
/// ```
pub struct SearchEngineBuilder<K: UsageKey = ByValue> {
    tolerance: Option<Tolerance>,
    budget: SearchBudget,
    _key: PhantomData<fn() -> K>,
}

impl SearchEngineBuilder<ByValue> {
    pub fn new() -> Self {
        Self {
            tolerance: None,
            budget: SearchBudget::unlimited(),
            _key: PhantomData,
        }
    }
}

impl Default for SearchEngineBuilder<ByValue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: UsageKey> SearchEngineBuilder<K> {
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_node_limit(mut self, max_nodes: u64) -> Self {
        self.budget = self.budget.with_max_nodes(max_nodes);
        self
    }

    pub fn with_depth_limit(mut self, max_depth: usize) -> Self {
        self.budget = self.budget.with_max_depth(max_depth);
        self
    }

    /// Switch the used-set keying, keeping everything configured so far.
    pub fn keyed_by<K2: UsageKey>(self) -> SearchEngineBuilder<K2> {
        SearchEngineBuilder {
            tolerance: self.tolerance,
            budget: self.budget,
            _key: PhantomData,
        }
    }

    pub fn build(self) -> SearchEngine<K> {
        SearchEngine::with_config(self.tolerance.unwrap_or_default(), self.budget)
    }
}
