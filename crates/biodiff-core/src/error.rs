//! Error type for grid construction, mutation and queries.

use thiserror::Error;

/// Errors returned by grid operations.
///
/// Every operation either fully applies its effect or returns one of
/// these without touching grid state.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// The operation named a species that was not registered at construction.
    #[error("unknown species '{name}'")]
    UnknownSpecies {
        /// The name that failed to resolve.
        name: String,
    },
    /// A numeric or structural input violated a precondition.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Human-readable description of the violation.
        reason: String,
    },
    /// A cell coordinate lies outside the grid.
    #[error("cell ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width (valid columns are `0..width`).
        width: usize,
        /// Grid height (valid rows are `0..height`).
        height: usize,
    },
}

impl GridError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}
