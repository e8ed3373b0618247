//! Plain-text rendering of a search outcome.

use std::fmt;

use crate::blocks::Target;
use crate::engine::SearchOutcome;

/// Human-readable report for one search.
///
/// ```
/// use gauge_stack::{search, Catalog, SearchReport, Target};
///
/// let catalog = Catalog::new(vec![5.0, 3.0, 2.0, 1.0]).unwrap();
/// let outcome = search(6.0, &catalog).unwrap();
/// let text = SearchReport::new(Target::new(6.0).unwrap(), &outcome).to_string();
/// assert!(text.contains("Number of gauge blocks: 2"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SearchReport<'a> {
    target: Target,
    outcome: &'a SearchOutcome,
    deviation: bool,
}

impl<'a> SearchReport<'a> {
    pub fn new(target: Target, outcome: &'a SearchOutcome) -> Self {
        Self {
            target,
            outcome,
            deviation: false,
        }
    }

    /// Report the sum as measured and its deviation from the target.
    pub fn with_deviation(mut self, deviation: bool) -> Self {
        self.deviation = deviation;
        self
    }
}

impl fmt::Display for SearchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.target;
        match self.outcome {
            SearchOutcome::Found(stack) => {
                writeln!(f, "Exact length of {target} mm:")?;
                writeln!(f)?;
                for block in stack.iter() {
                    writeln!(f, "{block:>8.5} mm")?;
                }
                writeln!(f)?;
                writeln!(f, "Number of gauge blocks: {}", stack.len())?;
                if self.deviation {
                    writeln!(f, "Sum (real): {:.5} mm", stack.sum())?;
                    write!(f, "Deviation: {:.5} mm", stack.deviation())
                } else {
                    write!(f, "Sum: {:.5} mm", stack.sum())
                }
            }
            SearchOutcome::NotFound => {
                write!(f, "No exact combination for {target} mm found.")
            }
            SearchOutcome::Aborted(reason) => {
                write!(f, "Search for {target} mm aborted: {reason}.")
            }
        }
    }
}
