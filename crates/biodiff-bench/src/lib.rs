//! Benchmark profiles for the biodiff diffusion grid.
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), three species
//! - [`stress_profile`]: 316x316 grid (~100K cells), same species
//! - [`seed_sources`]: deterministic point sources via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use biodiff_core::{DiffusionScheme, GridConfig, GridError};
use biodiff_grid::DiffusionGrid;

/// Species used by every profile, with their coefficients.
pub const PROFILE_SPECIES: [(&str, f64); 3] = [("AHL", 0.5), ("LuxR", 0.1), ("GFP", 0.0)];

/// Particles placed at each source.
pub const SOURCE_AMOUNT: i64 = 100_000;

fn profile(side: usize, scheme: DiffusionScheme, seed: u64) -> Result<DiffusionGrid, GridError> {
    let config = GridConfig::new(side, side)
        .with_species(PROFILE_SPECIES.iter().map(|(name, _)| *name))
        .with_scheme(scheme);
    let mut grid = DiffusionGrid::new(config)?;
    for (name, d) in PROFILE_SPECIES {
        grid.set_diffusion_coefficient(name, d)?;
    }
    for (slot, (name, _)) in PROFILE_SPECIES.iter().enumerate() {
        for (x, y) in seed_sources(side, side, 8, seed.wrapping_add(slot as u64)) {
            grid.add_molecule(x, y, name, SOURCE_AMOUNT)?;
        }
    }
    Ok(grid)
}

/// Build the reference benchmark grid: 100x100 cells.
///
/// AHL (D=0.5) and LuxR (D=0.1) spread; GFP (D=0) stays put. Each species
/// starts from 8 point sources of [`SOURCE_AMOUNT`] particles.
pub fn reference_profile(scheme: DiffusionScheme, seed: u64) -> Result<DiffusionGrid, GridError> {
    profile(100, scheme, seed)
}

/// Build the stress benchmark grid: 316x316 cells.
///
/// Same species and sources as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(scheme: DiffusionScheme, seed: u64) -> Result<DiffusionGrid, GridError> {
    profile(316, scheme, seed)
}

/// Generate `n` distinct deterministic `(x, y)` source positions.
///
/// Positions come from a simple LCG over the seed with linear probing on
/// collision. `n` is clamped to the number of cells.
pub fn seed_sources(width: usize, height: usize, n: usize, seed: u64) -> Vec<(usize, usize)> {
    let cells = width * height;
    let n = n.min(cells);
    let mut taken = vec![false; cells];
    let mut sources = Vec::with_capacity(n);
    for i in 0..n {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i as u64 * 1442695040888963407)
            % cells as u64) as usize;
        while taken[pos] {
            pos = (pos + 1) % cells;
        }
        taken[pos] = true;
        sources.push((pos % width, pos / width));
    }
    sources
}
