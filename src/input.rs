//! Parsing of user-typed lengths.
//!
//! Lengths are typed the way they are written on a drawing, so a decimal
//! comma is accepted everywhere (`41,3` reads as `41.3`).

use crate::blocks::{Catalog, Target};
use crate::error::InputError;

/// Parse one length, accepting a decimal comma.
pub fn parse_length(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| InputError::Unparseable {
            input: trimmed.to_string(),
        })
}

/// Parse and validate a target length.
pub fn parse_target(text: &str) -> Result<Target, InputError> {
    Target::new(parse_length(text)?)
}

/// Parse a block list.
///
/// Blocks are separated by whitespace, newlines or `;`. A `#` starts a
/// comment running to the end of the line. Order is preserved.
pub fn parse_catalog(text: &str) -> Result<Catalog, InputError> {
    let blocks = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == ';'))
        .filter(|token| !token.is_empty())
        .map(parse_length)
        .collect::<Result<Vec<_>, _>>()?;
    Catalog::new(blocks)
}
