//! Gauge-block stack search.
//!
//! Given a target length and a catalog of calibrated blocks, find a stack of
//! distinct blocks whose lengths add up to the target within a small
//! tolerance. This is exact subset-sum over real-valued denominations, solved
//! by depth-first backtracking with monotone pruning.
//!
//! ## Core idea
//! 1. Wrap the available lengths in a [`Catalog`] (or pick a reference set
//!    from [`catalogs`]).
//! 2. Configure a [`SearchEngine`] (tolerance, optional budget, used-set
//!    keying), directly or through [`SearchEngineBuilder`].
//! 3. Call [`SearchEngine::search`]: you get back the first matching
//!    [`Combination`] in catalog order, `NotFound`, or `Aborted` when a
//!    budget was hit.
//!
//! The search accepts the first match it reaches. It does not look for the
//! fewest blocks or the smallest deviation.
//!
//! ## Quick start
//! ```
//! use gauge_stack::{catalogs::CatalogKind, SearchEngine, SearchOutcome};
//!
//! let catalog = CatalogKind::Ideal.catalog();
//! let outcome = SearchEngine::new().search(41.3, &catalog).unwrap();
//! let stack = outcome.combination().unwrap();
//! assert_eq!(stack.blocks(), &[30.0, 10.0, 1.3]);
//! assert!(stack.deviation().abs() < 0.005);
//!
//! let miss = SearchEngine::new().search(0.5, &catalog).unwrap();
//! assert_eq!(miss, SearchOutcome::NotFound);
//! ```
//!
//! ## Features
//! - `tracing`: spans and events around every search.
//! - `parallel`: [`SearchEngine::search_many`] runs on the rayon pool.
//! - `cli` (default): the `gauge` binary.
//! - `probe`: the `scale_probe` binary.

pub mod blocks;
pub mod budget;
pub mod builder;
pub mod catalogs;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod traits;
pub mod utils;

pub use crate::blocks::{Catalog, Combination, Target};
pub use crate::budget::SearchBudget;
pub use crate::builder::SearchEngineBuilder;
pub use crate::engine::{search, AbortReason, SearchEngine, SearchOutcome, SearchStats};
pub use crate::error::InputError;
pub use crate::report::SearchReport;
pub use crate::traits::{ByPosition, ByValue, UsageKey};
pub use crate::utils::{Tolerance, DEFAULT_TOLERANCE};
