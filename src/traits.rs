//! How the search decides that a catalog entry is already in use.
//!
//! The engine never tracks catalog entries directly. Each position is first
//! mapped to a *slot*, and a slot can be committed to the current combination
//! at most once. The [`UsageKey`] implementation picks the mapping:
//!
//! - [`ByValue`]: positions holding the same length share one slot, so equal
//!   values are a single resource. This is the default and the historical
//!   behavior of the calculator.
//! - [`ByPosition`]: every position is its own slot, so duplicated lengths
//!   are independent physical pieces.
//!
//! The two only differ on catalogs that contain repeated values.

use std::collections::HashMap;

/// Maps catalog positions to used-set slots.
pub trait UsageKey {
    /// Short label used in logs and CLI output.
    const NAME: &'static str;

    /// Return, for each position of `blocks`, the slot it consumes.
    ///
    /// Slots must be dense in `0..blocks.len()` so the engine can index a
    /// flat used-set with them.
    fn slots(blocks: &[f64]) -> Vec<usize>;
}

/// Equal lengths share a slot (value-keyed used-set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByValue;

/// Every catalog position is its own slot (position-keyed used-set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByPosition;

impl UsageKey for ByValue {
    const NAME: &'static str = "value";

    fn slots(blocks: &[f64]) -> Vec<usize> {
        // Blocks are finite and positive, so bit equality is numeric equality.
        let mut first_seen: HashMap<u64, usize> = HashMap::with_capacity(blocks.len());
        blocks
            .iter()
            .enumerate()
            .map(|(idx, v)| *first_seen.entry(v.to_bits()).or_insert(idx))
            .collect()
    }
}

impl UsageKey for ByPosition {
    const NAME: &'static str = "position";

    fn slots(blocks: &[f64]) -> Vec<usize> {
        (0..blocks.len()).collect()
    }
}
