//! The flat snapshot record and its conversion to and from a grid.

use crate::error::SnapshotError;
use biodiff_core::{DiffusionScheme, GridConfig};
use biodiff_grid::DiffusionGrid;
use tracing::debug;

/// One species in a snapshot, in slot order.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesEntry {
    /// Species name.
    pub name: String,
    /// Diffusion coefficient at capture time.
    pub coefficient: f64,
}

/// Complete, self-contained grid state.
///
/// `counts` holds `width * height * species.len()` entries, species-major
/// then row-major, exactly as the grid stores them.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSnapshot {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Physical edge length of one cell.
    pub cell_size: f64,
    /// Sampling scheme of the captured grid.
    pub scheme: DiffusionScheme,
    /// Species in slot order.
    pub species: Vec<SpeciesEntry>,
    /// Particle counts.
    pub counts: Vec<u64>,
}

impl GridSnapshot {
    /// Copy the full state of `grid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use biodiff_grid::DiffusionGrid;
    /// use biodiff_snapshot::GridSnapshot;
    ///
    /// let mut grid = DiffusionGrid::with_species(3, 3, ["AHL"]).unwrap();
    /// grid.add_molecule(1, 1, "AHL", 9).unwrap();
    ///
    /// let snap = GridSnapshot::capture(&grid);
    /// assert_eq!(snap.restore().unwrap(), grid);
    /// ```
    pub fn capture(grid: &DiffusionGrid) -> Self {
        let species = grid
            .species()
            .iter()
            .map(|(_, name, coefficient)| SpeciesEntry {
                name: name.to_string(),
                coefficient,
            })
            .collect::<Vec<_>>();
        debug!(
            width = grid.width(),
            height = grid.height(),
            species = species.len(),
            "captured grid snapshot"
        );
        // Grid construction caps both dimensions at u32::MAX.
        Self {
            width: grid.width() as u32,
            height: grid.height() as u32,
            cell_size: grid.cell_size(),
            scheme: grid.scheme(),
            species,
            counts: grid.counts().to_vec(),
        }
    }

    /// The configuration this snapshot was captured from.
    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.width as usize, self.height as usize)
            .with_species(self.species.iter().map(|s| s.name.clone()))
            .with_cell_size(self.cell_size)
            .with_scheme(self.scheme)
    }

    /// Rebuild the grid.
    ///
    /// # Errors
    ///
    /// `SnapshotError::Grid` if the record violates a grid invariant:
    /// zero dimensions, bad cell size, duplicate names, non-finite
    /// coefficients, or a count array of the wrong length.
    pub fn restore(&self) -> Result<DiffusionGrid, SnapshotError> {
        let coefficients: Vec<f64> = self.species.iter().map(|s| s.coefficient).collect();
        let grid = DiffusionGrid::from_parts(self.config(), &coefficients, self.counts.clone())?;
        debug!(
            width = self.width,
            height = self.height,
            species = self.species.len(),
            "restored grid snapshot"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biodiff_core::GridError;

    #[test]
    fn capture_copies_every_field() {
        let mut grid = DiffusionGrid::new(
            GridConfig::new(3, 2)
                .with_species(["A", "B"])
                .with_cell_size(0.5)
                .with_scheme(DiffusionScheme::Multinomial),
        )
        .unwrap();
        grid.set_diffusion_coefficient("B", 0.75).unwrap();
        grid.add_molecule(2, 1, "B", 11).unwrap();

        let snap = GridSnapshot::capture(&grid);
        assert_eq!(snap.width, 3);
        assert_eq!(snap.height, 2);
        assert_eq!(snap.cell_size, 0.5);
        assert_eq!(snap.scheme, DiffusionScheme::Multinomial);
        assert_eq!(
            snap.species,
            vec![
                SpeciesEntry {
                    name: "A".into(),
                    coefficient: 0.0
                },
                SpeciesEntry {
                    name: "B".into(),
                    coefficient: 0.75
                },
            ]
        );
        assert_eq!(snap.counts.len(), 12);
        assert_eq!(snap.counts[6 + 5], 11);
    }

    #[test]
    fn restore_rejects_duplicate_species() {
        let snap = GridSnapshot {
            width: 1,
            height: 1,
            cell_size: 1.0,
            scheme: DiffusionScheme::IndependentBinomial,
            species: vec![
                SpeciesEntry {
                    name: "A".into(),
                    coefficient: 0.0,
                },
                SpeciesEntry {
                    name: "A".into(),
                    coefficient: 0.0,
                },
            ],
            counts: vec![0, 0],
        };
        assert!(matches!(
            snap.restore(),
            Err(SnapshotError::Grid(GridError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn restore_rejects_short_counts() {
        let snap = GridSnapshot {
            width: 2,
            height: 2,
            cell_size: 1.0,
            scheme: DiffusionScheme::IndependentBinomial,
            species: vec![SpeciesEntry {
                name: "A".into(),
                coefficient: 0.1,
            }],
            counts: vec![1, 2, 3],
        };
        assert!(matches!(snap.restore(), Err(SnapshotError::Grid(_))));
    }
}
