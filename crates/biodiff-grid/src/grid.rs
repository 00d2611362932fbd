//! Grid storage, particle insertion and count queries.

use biodiff_core::{DiffusionScheme, GridConfig, GridError, SpeciesId, SpeciesRegistry};
use tracing::debug;

/// A 2D grid of integer particle counts for a fixed set of species.
///
/// Cell `(x, y)` has column `x` in `0..width` and row `y` in `0..height`.
/// Counts are stored as one contiguous row-major plane per species, so a
/// species plane is `&counts[s * cells..(s + 1) * cells]`.
///
/// All mutation goes through `&mut self`; callers that share a grid
/// across threads must serialize access themselves.
///
/// # Examples
///
/// ```
/// use biodiff_grid::DiffusionGrid;
///
/// let mut grid = DiffusionGrid::with_species(5, 5, ["AHL"]).unwrap();
/// grid.add_molecule(2, 3, "AHL", 100).unwrap();
/// assert_eq!(grid.concentration(2, 3, "AHL").unwrap(), 100);
///
/// // Removal clamps at zero.
/// grid.add_molecule(2, 3, "AHL", -500).unwrap();
/// assert_eq!(grid.concentration(2, 3, "AHL").unwrap(), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusionGrid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cell_size: f64,
    pub(crate) scheme: DiffusionScheme,
    pub(crate) species: SpeciesRegistry,
    pub(crate) counts: Vec<u64>,
}

impl DiffusionGrid {
    /// Build an all-zero grid from a validated configuration.
    ///
    /// Every species starts with diffusion coefficient 0.0 (immobile).
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidParameter` for zero dimensions, a
    /// non-positive or non-finite cell size, or duplicate species names.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let species = SpeciesRegistry::new(config.species)?;
        let counts = vec![0; config.width * config.height * species.len()];
        debug!(
            width = config.width,
            height = config.height,
            species = species.len(),
            cell_size = config.cell_size,
            scheme = ?config.scheme,
            "created diffusion grid"
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            scheme: config.scheme,
            species,
            counts,
        })
    }

    /// Shorthand for a `width x height` grid with unit cell size.
    pub fn with_species<I, S>(width: usize, height: usize, species: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(GridConfig::new(width, height).with_species(species))
    }

    /// Rebuild a grid from raw parts.
    ///
    /// `coefficients` is in slot order; `counts` is species-major, row-major,
    /// with exactly `width * height * species` entries.
    pub fn from_parts(
        config: GridConfig,
        coefficients: &[f64],
        counts: Vec<u64>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(config)?;
        if coefficients.len() != grid.species.len() {
            return Err(GridError::InvalidParameter {
                reason: format!(
                    "expected {} diffusion coefficients, got {}",
                    grid.species.len(),
                    coefficients.len()
                ),
            });
        }
        if counts.len() != grid.counts.len() {
            return Err(GridError::InvalidParameter {
                reason: format!(
                    "expected {} counts, got {}",
                    grid.counts.len(),
                    counts.len()
                ),
            });
        }
        let names: Vec<String> = grid.species.names().map(str::to_string).collect();
        for (name, &d) in names.iter().zip(coefficients) {
            grid.species.set_coefficient(name, d)?;
        }
        grid.counts = counts;
        Ok(grid)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Physical edge length of one cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Sampling scheme used by [`diffuse`](Self::diffuse).
    pub fn scheme(&self) -> DiffusionScheme {
        self.scheme
    }

    /// Number of cells in one species plane.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// The species table, including current coefficients.
    pub fn species(&self) -> &SpeciesRegistry {
        &self.species
    }

    /// Number of registered species.
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Species names in slot order.
    pub fn species_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.species.names()
    }

    /// Resolve a species name to its slot.
    pub fn species_id(&self, name: &str) -> Result<SpeciesId, GridError> {
        self.species.id(name)
    }

    /// Current diffusion coefficient of `name`.
    pub fn diffusion_coefficient(&self, name: &str) -> Result<f64, GridError> {
        self.species.coefficient(name)
    }

    /// Set the diffusion coefficient of an existing species.
    ///
    /// Zero or negative coefficients make the species immobile. Unknown
    /// names fail with `UnknownSpecies`, non-finite values with
    /// `InvalidParameter`.
    pub fn set_diffusion_coefficient(&mut self, name: &str, d: f64) -> Result<(), GridError> {
        self.species.set_coefficient(name, d)
    }

    /// Add `amount` particles of `name` at `(x, y)`; negative amounts remove.
    ///
    /// The result is clamped at zero, so over-removal leaves exactly zero.
    /// Additions saturate at `u64::MAX`.
    ///
    /// # Errors
    ///
    /// `UnknownSpecies` if `name` is not registered, `OutOfRange` if
    /// `(x, y)` is outside the grid. Neither mutates the grid.
    pub fn add_molecule(&mut self, x: usize, y: usize, name: &str, amount: i64) -> Result<(), GridError> {
        let id = self.species.id(name)?;
        let i = self.index(x, y, id)?;
        let slot = &mut self.counts[i];
        *slot = if amount >= 0 {
            slot.saturating_add(amount as u64)
        } else {
            slot.saturating_sub(amount.unsigned_abs())
        };
        Ok(())
    }

    /// Particle count of `name` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// `UnknownSpecies` if `name` is not registered, `OutOfRange` if
    /// `(x, y)` is outside the grid.
    pub fn concentration(&self, x: usize, y: usize, name: &str) -> Result<u64, GridError> {
        let id = self.species.id(name)?;
        Ok(self.counts[self.index(x, y, id)?])
    }

    /// Read-only row-major count plane of one species, if registered.
    pub fn plane(&self, id: SpeciesId) -> Option<&[u64]> {
        if id.index() >= self.species.len() {
            return None;
        }
        let cells = self.cell_count();
        let start = id.index() * cells;
        Some(&self.counts[start..start + cells])
    }

    /// All counts, species-major then row-major.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total particles of `name` over the whole grid.
    pub fn species_total(&self, name: &str) -> Result<u128, GridError> {
        let id = self.species.id(name)?;
        Ok(self
            .plane(id)
            .map(|p| p.iter().map(|&v| v as u128).sum())
            .unwrap_or(0))
    }

    /// Total particles of every species over the whole grid.
    pub fn total(&self) -> u128 {
        self.counts.iter().map(|&v| v as u128).sum()
    }

    /// Zero every count. Coefficients are kept.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    fn index(&self, x: usize, y: usize, id: SpeciesId) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(id.index() * self.cell_count() + y * self.width + x)
    }
}
