//! Optional bounds on how much work one search may do.
//!
//! The search itself has no internal safeguard: the number of ordered
//! selections grows factorially with the catalog. A budget turns a runaway
//! search into [`SearchOutcome::Aborted`](crate::engine::SearchOutcome::Aborted)
//! instead of an unbounded run.

/// Caps on visited nodes and on stack height. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum number of search nodes visited, root included.
    pub max_nodes: Option<u64>,
    /// Maximum number of blocks in a partial combination that is still expanded.
    pub max_depth: Option<usize>,
}

impl SearchBudget {
    /// No bounds; the search runs to a match or to exhaustion.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(self, max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            ..self
        }
    }

    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..self
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.max_depth.is_none()
    }

    /// True when visiting one more node would exceed the node cap.
    #[inline]
    pub fn nodes_exhausted(&self, visited: u64) -> bool {
        self.max_nodes.is_some_and(|limit| visited >= limit)
    }

    /// True when a combination of `depth` blocks must not be expanded further.
    #[inline]
    pub fn depth_reached(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|limit| depth >= limit)
    }
}
