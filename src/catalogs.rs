//! Reference gauge-block sets.
//!
//! Two 32-piece metric sets are shipped as data:
//! - [`IDEAL_BLOCKS`]: nominal lengths, in mm.
//! - [`REAL_BLOCKS`]: the same set as calibrated, each piece slightly off
//!   nominal. Stacks built from it are reported with their deviation.
//!
//! Both are listed in search order (largest first), which makes the engine
//! reach for the big pieces before the small ones.

use std::fmt;
use std::str::FromStr;

use crate::blocks::Catalog;

/// Nominal block lengths (mm).
pub const IDEAL_BLOCKS: [f64; 32] = [
    50.0, 30.0, 20.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, //
    1.9, 1.8, 1.7, 1.6, 1.5, 1.4, 1.3, 1.2, //
    1.1, 1.09, 1.08, 1.07, 1.06, 1.05, //
    1.04, 1.03, 1.02, 1.01, 1.005, 1.0,
];

/// Calibrated block lengths (mm), position for position with [`IDEAL_BLOCKS`].
pub const REAL_BLOCKS: [f64; 32] = [
    50.00028, 30.00025, 19.99979, 10.00012, 9.00005, 7.99960, 6.99985, 5.99988, //
    5.00002, 4.00040, 3.00002, 2.00014, 1.90028, 1.79992, 1.70032, 1.60038, //
    1.50033, 1.40016, 1.29970, 1.20005, 1.10000, 1.09045, 1.07969, 1.07010, //
    1.06015, 1.04972, 1.04004, 1.03040, 1.01967, 1.01005, 1.00472, 0.99990,
];

/// Which reference set to search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CatalogKind {
    #[default]
    Ideal,
    Real,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Ideal, CatalogKind::Real];

    pub fn blocks(self) -> &'static [f64] {
        match self {
            CatalogKind::Ideal => &IDEAL_BLOCKS,
            CatalogKind::Real => &REAL_BLOCKS,
        }
    }

    pub fn catalog(self) -> Catalog {
        Catalog::trusted(self.blocks().to_vec())
    }

    /// Measured sets report how far the stack lands from the target.
    pub fn reports_deviation(self) -> bool {
        matches!(self, CatalogKind::Real)
    }

    pub fn name(self) -> &'static str {
        match self {
            CatalogKind::Ideal => "ideal",
            CatalogKind::Real => "real",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ideal" => Ok(CatalogKind::Ideal),
            "real" => Ok(CatalogKind::Real),
            other => Err(format!("unknown catalog '{other}' (expected ideal or real)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sets_pass_validation() {
        for kind in CatalogKind::ALL {
            let validated = Catalog::from_slice(kind.blocks()).unwrap();
            assert_eq!(validated, kind.catalog());
            assert_eq!(validated.len(), 32);
        }
    }

    #[test]
    fn reference_sets_hold_distinct_values() {
        for kind in CatalogKind::ALL {
            let mut bits: Vec<u64> = kind.blocks().iter().map(|v| v.to_bits()).collect();
            bits.sort_unstable();
            bits.dedup();
            assert_eq!(bits.len(), 32, "{kind} has duplicate lengths");
        }
    }

    #[test]
    fn real_set_tracks_nominal_within_half_a_micron() {
        for (ideal, real) in IDEAL_BLOCKS.iter().zip(REAL_BLOCKS.iter()) {
            assert!((ideal - real).abs() < 0.0005, "{real} too far from {ideal}");
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Real".parse::<CatalogKind>(), Ok(CatalogKind::Real));
        assert_eq!(" ideal ".parse::<CatalogKind>(), Ok(CatalogKind::Ideal));
        assert!("nominal".parse::<CatalogKind>().is_err());
        assert_eq!(CatalogKind::Real.to_string(), "real");
        assert!(CatalogKind::Real.reports_deviation());
        assert!(!CatalogKind::Ideal.reports_deviation());
    }
}
