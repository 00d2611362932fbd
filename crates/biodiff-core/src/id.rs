//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a species slot within a grid.
///
/// Species are registered at grid creation and assigned sequential IDs.
/// `SpeciesId(n)` corresponds to the n-th name in the construction list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    /// The slot as a `usize`, for indexing count planes.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
