//! Depth-first gauge-block search.
//!
//! The engine looks for an ordered selection of catalog blocks, each slot
//! used at most once, whose sum lands within tolerance of the target:
//!
//! 1. A partial combination within `ε` of the target is accepted
//!    immediately and the whole search unwinds with it. If that is the empty
//!    root (a target below `ε`), the search reports `NotFound`: zero blocks
//!    is no stack.
//! 2. A partial sum above the target is pruned. Blocks are positive, so no
//!    extension of that branch can come back down.
//! 3. Otherwise every catalog entry whose slot is still free is tried, in
//!    index order, and the search descends into it.
//!
//! Descent uses an explicit frame stack (one frame per stacked block) rather
//! than host recursion, so depth is bounded by the catalog length alone.
//! Traversal order is fixed: the first match in index-order DFS wins, not the
//! shortest or the closest one.
//!
//! The engine is generic over [`UsageKey`], which decides whether equal
//! lengths at different positions count as one resource ([`ByValue`], the
//! default) or as independent pieces ([`ByPosition`]).

use std::fmt;
use std::marker::PhantomData;

use crate::blocks::{Catalog, Combination, Target};
use crate::budget::SearchBudget;
use crate::error::InputError;
use crate::traits::{ByValue, UsageKey};
use crate::utils::{beyond_total, Tolerance};

/// Result of one search over a valid target and catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// First combination found whose sum is within tolerance of the target.
    Found(Combination),
    /// Search space exhausted; no subset of the catalog matches.
    NotFound,
    /// A [`SearchBudget`] bound stopped the search before it could conclude.
    Aborted(AbortReason),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn combination(&self) -> Option<&Combination> {
        match self {
            SearchOutcome::Found(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_combination(self) -> Option<Combination> {
        match self {
            SearchOutcome::Found(c) => Some(c),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Found(_) => "found",
            SearchOutcome::NotFound => "not_found",
            SearchOutcome::Aborted(_) => "aborted",
        }
    }
}

/// Which budget bound ended an aborted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    NodeLimit { limit: u64 },
    DepthLimit { limit: usize },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::NodeLimit { limit } => write!(f, "node limit of {limit} reached"),
            AbortReason::DepthLimit { limit } => {
                write!(f, "depth limit of {limit} blocks reached")
            }
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes visited, the empty root included.
    pub nodes: u64,
    /// Nodes whose children were generated.
    pub expanded: u64,
    /// Children rejected because their sum exceeded the target.
    pub pruned: u64,
    /// Expanded levels unwound after all their children failed.
    pub backtracks: u64,
    /// Children left unexpanded because of the depth budget.
    pub depth_cutoffs: u64,
    /// Largest number of blocks in a visited partial combination.
    pub max_depth: usize,
    /// Largest partial sum that was expanded.
    pub max_expanded_sum: f64,
}

/// One level of the descent: the next catalog index to try at this depth.
#[derive(Debug, Clone, Copy)]
struct Frame {
    next: usize,
}

/// Partial combination, its prefix sums and the used-set.
///
/// Prefix sums are stacked rather than recomputed by subtraction, so the sum
/// at any depth is bit-identical to adding the blocks left to right.
struct SearchState<'a> {
    blocks: &'a [f64],
    slots: Vec<usize>,
    used: Vec<bool>,
    positions: Vec<usize>,
    sums: Vec<f64>,
}

impl<'a> SearchState<'a> {
    fn new(blocks: &'a [f64], slots: Vec<usize>) -> Self {
        debug_assert_eq!(blocks.len(), slots.len());
        let mut sums = Vec::with_capacity(blocks.len() + 1);
        sums.push(0.0);
        Self {
            blocks,
            slots,
            used: vec![false; blocks.len()],
            positions: Vec::with_capacity(blocks.len()),
            sums,
        }
    }

    #[inline]
    fn depth(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn sum(&self) -> f64 {
        self.sums.last().copied().unwrap_or(0.0)
    }

    /// First catalog index at or after `from` whose slot is free.
    fn next_free(&self, from: usize) -> Option<usize> {
        (from..self.blocks.len()).find(|&idx| !self.used[self.slots[idx]])
    }

    fn push(&mut self, idx: usize) {
        self.used[self.slots[idx]] = true;
        let sum = self.sum() + self.blocks[idx];
        self.positions.push(idx);
        self.sums.push(sum);
    }

    fn pop(&mut self) {
        if let Some(idx) = self.positions.pop() {
            self.used[self.slots[idx]] = false;
            self.sums.pop();
        }
    }

    fn into_combination(self, target: f64) -> Combination {
        let sum = self.sum();
        let blocks = self.positions.iter().map(|&idx| self.blocks[idx]).collect();
        Combination::new(blocks, self.positions, sum, target)
    }
}

/// Gauge-block search engine.
///
/// Typical usage:
/// ```
/// use gauge_stack::{Catalog, SearchEngine};
///
/// let catalog = Catalog::new(vec![5.0, 3.0, 2.0, 1.0]).unwrap();
/// let engine = SearchEngine::new();
/// let outcome = engine.search(6.0, &catalog).unwrap();
/// let stack = outcome.combination().unwrap();
/// assert_eq!(stack.blocks(), &[5.0, 1.0]);
/// assert_eq!(stack.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<K: UsageKey = ByValue> {
    tolerance: Tolerance,
    budget: SearchBudget,
    _key: PhantomData<fn() -> K>,
}

impl SearchEngine<ByValue> {
    /// Value-keyed engine with the default tolerance and no budget.
    pub fn new() -> Self {
        Self::with_config(Tolerance::default(), SearchBudget::unlimited())
    }
}

impl Default for SearchEngine<ByValue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: UsageKey> SearchEngine<K> {
    pub fn with_config(tolerance: Tolerance, budget: SearchBudget) -> Self {
        Self {
            tolerance,
            budget,
            _key: PhantomData,
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    /// Name of the used-set keying in effect (`"value"` or `"position"`).
    pub fn usage_key(&self) -> &'static str {
        K::NAME
    }

    /// Validate `target` and search `catalog` for a matching stack.
    ///
    /// Invalid targets are rejected before any search work. An unreachable
    /// target is `Ok(SearchOutcome::NotFound)`, not an error.
    pub fn search(&self, target: f64, catalog: &Catalog) -> Result<SearchOutcome, InputError> {
        self.search_with_stats(target, catalog)
            .map(|(outcome, _)| outcome)
    }

    /// Like [`search`](Self::search), also returning the search counters.
    pub fn search_with_stats(
        &self,
        target: f64,
        catalog: &Catalog,
    ) -> Result<(SearchOutcome, SearchStats), InputError> {
        let target = Target::new(target)?;
        Ok(self.run(target, catalog))
    }

    /// Search with an already validated target.
    pub fn run(&self, target: Target, catalog: &Catalog) -> (SearchOutcome, SearchStats) {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "gauge_search",
            target = target.value(),
            blocks = catalog.len(),
            key = K::NAME
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut stats = SearchStats::default();
        let outcome = self.descend(target.value(), catalog.blocks(), &mut stats);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            outcome = outcome.label(),
            nodes = stats.nodes,
            pruned = stats.pruned,
            backtracks = stats.backtracks,
            max_depth = stats.max_depth,
            "search finished"
        );

        (outcome, stats)
    }

    fn node_limit_hit(&self, visited: u64) -> Option<AbortReason> {
        self.budget
            .max_nodes
            .filter(|_| self.budget.nodes_exhausted(visited))
            .map(|limit| AbortReason::NodeLimit { limit })
    }

    fn descend(&self, target: f64, blocks: &[f64], stats: &mut SearchStats) -> SearchOutcome {
        if blocks.is_empty() {
            return SearchOutcome::NotFound;
        }
        let total = crate::utils::sequential_sum(blocks);
        if beyond_total(target, total, blocks.len(), self.tolerance) {
            #[cfg(feature = "tracing")]
            tracing::trace!(total, "target exceeds the whole catalog");
            return SearchOutcome::NotFound;
        }
        if self.tolerance.accepts(0.0, target) {
            // The empty stack already matches; zero blocks is reported as no match.
            #[cfg(feature = "tracing")]
            tracing::trace!("target within tolerance of the empty stack");
            return SearchOutcome::NotFound;
        }
        if let Some(reason) = self.node_limit_hit(stats.nodes) {
            return SearchOutcome::Aborted(reason);
        }

        let mut state = SearchState::new(blocks, K::slots(blocks));

        // Past this point the root is neither accepted nor, with a positive target, pruned.
        stats.nodes = 1;
        if self.budget.depth_reached(0) {
            stats.depth_cutoffs += 1;
            return self.exhausted(stats);
        }
        stats.expanded = 1;
        let mut frames = Vec::with_capacity(blocks.len() + 1);
        frames.push(Frame { next: 0 });

        while let Some(&Frame { next }) = frames.last() {
            let Some(idx) = state.next_free(next) else {
                frames.pop();
                if !frames.is_empty() {
                    state.pop();
                    stats.backtracks += 1;
                }
                continue;
            };
            let top = frames.len() - 1;
            frames[top].next = idx + 1;

            if let Some(reason) = self.node_limit_hit(stats.nodes) {
                return SearchOutcome::Aborted(reason);
            }
            state.push(idx);
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(state.depth());

            let sum = state.sum();
            if self.tolerance.accepts(sum, target) {
                #[cfg(feature = "tracing")]
                tracing::trace!(sum, depth = state.depth(), "accepted");
                return SearchOutcome::Found(state.into_combination(target));
            }
            if sum > target {
                stats.pruned += 1;
                state.pop();
                continue;
            }
            if self.budget.depth_reached(state.depth()) {
                stats.depth_cutoffs += 1;
                state.pop();
                continue;
            }
            stats.expanded += 1;
            stats.max_expanded_sum = stats.max_expanded_sum.max(sum);
            frames.push(Frame { next: 0 });
        }

        self.exhausted(stats)
    }

    /// Outcome once every branch is closed: `NotFound` only if nothing was
    /// cut off by the depth budget.
    fn exhausted(&self, stats: &SearchStats) -> SearchOutcome {
        match self.budget.max_depth {
            Some(limit) if stats.depth_cutoffs > 0 => {
                SearchOutcome::Aborted(AbortReason::DepthLimit { limit })
            }
            _ => SearchOutcome::NotFound,
        }
    }
}

#[cfg(feature = "parallel")]
impl<K: UsageKey> SearchEngine<K> {
    /// Run one independent search per target on the rayon pool.
    ///
    /// Results come back in `targets` order and match the serial path exactly.
    pub fn search_many(
        &self,
        targets: &[f64],
        catalog: &Catalog,
    ) -> Vec<Result<SearchOutcome, InputError>> {
        use rayon::prelude::*;

        targets
            .par_iter()
            .map(|&target| self.search(target, catalog))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
impl<K: UsageKey> SearchEngine<K> {
    /// Run one independent search per target, in order.
    pub fn search_many(
        &self,
        targets: &[f64],
        catalog: &Catalog,
    ) -> Vec<Result<SearchOutcome, InputError>> {
        targets
            .iter()
            .map(|&target| self.search(target, catalog))
            .collect()
    }
}

/// Search `catalog` for `target` with the default value-keyed engine.
pub fn search(target: f64, catalog: &Catalog) -> Result<SearchOutcome, InputError> {
    SearchEngine::new().search(target, catalog)
}
