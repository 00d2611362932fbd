//! Grid configuration and validation.
//!
//! [`GridConfig`] is the constructor input for a diffusion grid.
//! [`validate()`](GridConfig::validate) checks the structural invariants
//! (dimensions, cell size, species names) before any storage is allocated.

use crate::error::GridError;
use crate::species::SpeciesRegistry;

// ── DiffusionScheme ────────────────────────────────────────────────

/// How particles leaving a cell are sampled in one diffusion step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiffusionScheme {
    /// One independent `Binomial(n, p)` draw per direction, each against
    /// the cell's tick-start count. If the draws add up to more than the
    /// cell holds, directions are charged in a random order and each is
    /// cut to what remains, so no direction is favoured.
    #[default]
    IndependentBinomial,
    /// One multinomial draw per cell over {each available direction, stay},
    /// realised as a chain of conditional binomials. Never needs capping.
    Multinomial,
}

impl DiffusionScheme {
    /// Stable one-byte tag used by the snapshot format.
    pub fn tag(self) -> u8 {
        match self {
            Self::IndependentBinomial => 0,
            Self::Multinomial => 1,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::IndependentBinomial),
            1 => Some(Self::Multinomial),
            _ => None,
        }
    }
}

// ── GridConfig ─────────────────────────────────────────────────────

/// Construction parameters for a diffusion grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Number of columns. Default: 10.
    pub width: usize,
    /// Number of rows. Default: 10.
    pub height: usize,
    /// Species names in slot order. Default: none.
    pub species: Vec<String>,
    /// Physical edge length of one cell. Default: 1.0.
    pub cell_size: f64,
    /// Sampling scheme used by the diffusion step. Default: independent binomial.
    pub scheme: DiffusionScheme,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            species: Vec::new(),
            cell_size: 1.0,
            scheme: DiffusionScheme::default(),
        }
    }
}

impl GridConfig {
    /// Upper bound on the per-direction movement probability.
    ///
    /// Four directions at 0.25 each can at most empty a cell.
    pub const MAX_PROBABILITY: f64 = 0.25;

    /// Largest accepted width or height; the snapshot format stores both as `u32`.
    pub const MAX_DIM: usize = u32::MAX as usize;

    /// A `width x height` grid with no species and default cell size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Replace the species list.
    pub fn with_species<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.species = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the cell size.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Replace the sampling scheme.
    pub fn with_scheme(mut self, scheme: DiffusionScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Number of cells in one species plane.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check all structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidParameter` if:
    /// - `width` or `height` is zero or exceeds [`MAX_DIM`](Self::MAX_DIM)
    /// - the total count array would not fit in memory addressing
    /// - `cell_size` is not finite and positive
    /// - a species name appears twice
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > Self::MAX_DIM || self.height > Self::MAX_DIM {
            return Err(GridError::invalid(format!(
                "grid dimensions {}x{} exceed {}",
                self.width,
                self.height,
                Self::MAX_DIM
            )));
        }
        self.width
            .checked_mul(self.height)
            .and_then(|cells| cells.checked_mul(self.species.len()))
            .ok_or_else(|| {
                GridError::invalid(format!(
                    "{}x{} grid with {} species overflows usize",
                    self.width,
                    self.height,
                    self.species.len()
                ))
            })?;
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GridError::invalid(format!(
                "cell_size must be finite and positive, got {}",
                self.cell_size
            )));
        }
        SpeciesRegistry::new(self.species.iter().map(String::as_str))?;
        Ok(())
    }
}
