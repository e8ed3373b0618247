//! Input validation errors.
//!
//! Everything here is detected at the boundary, before any search work
//! starts. An unreachable target is *not* an error; it is reported as
//! [`SearchOutcome::NotFound`](crate::engine::SearchOutcome::NotFound).

use thiserror::Error;

/// Rejected caller input: a bad target, block, tolerance or unparsable text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("target must be a finite number, got {0}")]
    NonFiniteTarget(f64),

    #[error("target must be greater than 0, got {0}")]
    NonPositiveTarget(f64),

    #[error("block #{index} must be a finite length greater than 0, got {value}")]
    InvalidBlock { index: usize, value: f64 },

    #[error("tolerance must be a finite number greater than 0, got {0}")]
    InvalidTolerance(f64),

    #[error("'{input}' is not a valid number")]
    Unparseable { input: String },
}
