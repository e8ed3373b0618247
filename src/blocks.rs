//! Block-level data structures: the catalog searched over, the target
//! length, and the combination a successful search returns.

use std::fmt;

use crate::error::InputError;
use crate::utils::sequential_sum;

/// Target length of a search. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Target(f64);

impl Target {
    pub fn new(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() {
            Err(InputError::NonFiniteTarget(value))
        } else if value <= 0.0 {
            Err(InputError::NonPositiveTarget(value))
        } else {
            Ok(Self(value))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Target {
    type Error = InputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Shortest round-trip form with a decimal point kept: `6.0`, `41.3`.
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Ordered set of available block lengths.
///
/// Index order is the search order. Every entry is finite and strictly
/// positive; equal values may appear at several positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    blocks: Vec<f64>,
}

impl Catalog {
    /// Validate and wrap a list of block lengths.
    pub fn new(blocks: Vec<f64>) -> Result<Self, InputError> {
        if let Some((index, &value)) = blocks
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(InputError::InvalidBlock { index, value });
        }
        Ok(Self { blocks })
    }

    pub fn from_slice(blocks: &[f64]) -> Result<Self, InputError> {
        Self::new(blocks.to_vec())
    }

    /// Wrap blocks known to be valid (the built-in reference sets).
    pub(crate) fn trusted(blocks: Vec<f64>) -> Self {
        debug_assert!(blocks.iter().all(|v| v.is_finite() && *v > 0.0));
        Self { blocks }
    }

    /// Catalog with no blocks. No positive target is reachable from it.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn blocks(&self) -> &[f64] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of every block, in index order.
    pub fn total(&self) -> f64 {
        sequential_sum(&self.blocks)
    }

    pub fn smallest(&self) -> Option<f64> {
        self.blocks.iter().copied().reduce(f64::min)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.blocks.iter().copied()
    }
}

impl TryFrom<Vec<f64>> for Catalog {
    type Error = InputError;

    fn try_from(blocks: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(blocks)
    }
}

impl TryFrom<&[f64]> for Catalog {
    type Error = InputError;

    fn try_from(blocks: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(blocks)
    }
}

/// A stack of blocks whose sum matches the target within tolerance.
///
/// Only produced by a successful search; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    blocks: Vec<f64>,
    positions: Vec<usize>,
    sum: f64,
    target: f64,
}

impl Combination {
    pub(crate) fn new(blocks: Vec<f64>, positions: Vec<usize>, sum: f64, target: f64) -> Self {
        debug_assert_eq!(blocks.len(), positions.len());
        Self {
            blocks,
            positions,
            sum,
            target,
        }
    }

    /// Chosen block lengths, in the order they were stacked.
    #[inline]
    pub fn blocks(&self) -> &[f64] {
        &self.blocks
    }

    /// Catalog indices of [`blocks`](Self::blocks), position for position.
    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of gauge blocks in the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of the blocks, accumulated left to right.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `sum - target`; positive when the stack is long.
    #[inline]
    pub fn deviation(&self) -> f64 {
        self.sum - self.target
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.blocks.iter().copied()
    }

    pub fn into_blocks(self) -> Vec<f64> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_rejects_zero_negative_and_non_finite() {
        assert_eq!(Target::new(0.0), Err(InputError::NonPositiveTarget(0.0)));
        assert_eq!(Target::new(-1.0), Err(InputError::NonPositiveTarget(-1.0)));
        assert!(matches!(
            Target::new(f64::NAN),
            Err(InputError::NonFiniteTarget(_))
        ));
        assert_eq!(
            Target::new(f64::INFINITY),
            Err(InputError::NonFiniteTarget(f64::INFINITY))
        );
        assert_eq!(Target::new(41.3).map(Target::value), Ok(41.3));
    }

    #[test]
    fn target_display_keeps_the_decimal_point() {
        assert_eq!(Target::new(6.0).unwrap().to_string(), "6.0");
        assert_eq!(Target::new(41.3).unwrap().to_string(), "41.3");
        assert_eq!(Target::new(0.5).unwrap().to_string(), "0.5");
        assert_eq!(Target::new(123.456).unwrap().to_string(), "123.456");
    }

    #[test]
    fn catalog_reports_first_bad_block() {
        let err = Catalog::new(vec![5.0, 3.0, 0.0, -1.0]).unwrap_err();
        assert_eq!(err, InputError::InvalidBlock { index: 2, value: 0.0 });
        assert!(Catalog::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.total(), 0.0);
        assert_eq!(catalog.smallest(), None);
        assert_eq!(catalog, Catalog::empty());
    }

    #[test]
    fn catalog_keeps_order_and_duplicates() {
        let catalog = Catalog::try_from(vec![2.0, 5.0, 2.0, 1.0]).unwrap();
        assert_eq!(catalog.blocks(), &[2.0, 5.0, 2.0, 1.0]);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.total(), 10.0);
        assert_eq!(catalog.smallest(), Some(1.0));
    }

    #[test]
    fn combination_metrics() {
        let c = Combination::new(vec![5.0, 1.0], vec![0, 3], 6.0, 6.25);
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
        assert_eq!(c.sum(), 6.0);
        assert_eq!(c.deviation(), -0.25);
        assert_eq!(c.positions(), &[0, 3]);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![5.0, 1.0]);
        assert_eq!(c.into_blocks(), vec![5.0, 1.0]);
    }
}
