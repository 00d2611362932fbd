//! Test fixtures for biodiff development.
//!
//! Seeded generators and small grid scenarios shared by integration
//! tests and benchmarks. Everything here panics on bad input; it is not
//! meant for library code.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use biodiff_core::{DiffusionScheme, GridConfig};
use biodiff_grid::DiffusionGrid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every test and bench uses.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A `width x height` grid with one species `name` at coefficient `d`
/// and `amount` particles at `(x, y)`.
pub fn point_source(
    width: usize,
    height: usize,
    name: &str,
    d: f64,
    (x, y): (usize, usize),
    amount: i64,
) -> DiffusionGrid {
    point_source_with_scheme(
        DiffusionScheme::IndependentBinomial,
        width,
        height,
        name,
        d,
        (x, y),
        amount,
    )
}

/// [`point_source`] with an explicit sampling scheme.
pub fn point_source_with_scheme(
    scheme: DiffusionScheme,
    width: usize,
    height: usize,
    name: &str,
    d: f64,
    (x, y): (usize, usize),
    amount: i64,
) -> DiffusionGrid {
    let config = GridConfig::new(width, height)
        .with_species([name])
        .with_scheme(scheme);
    let mut grid = DiffusionGrid::new(config).expect("valid fixture config");
    grid.set_diffusion_coefficient(name, d)
        .expect("fixture species exists");
    grid.add_molecule(x, y, name, amount)
        .expect("fixture source in range");
    grid
}

/// A grid with several species, each seeded with a different deterministic
/// particle layout and coefficient `0.1 * (slot + 1)`.
pub fn mixed_species(width: usize, height: usize, names: &[&str], seed: u64) -> DiffusionGrid {
    let mut grid =
        DiffusionGrid::with_species(width, height, names.iter().copied()).expect("valid fixture");
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    for (slot, name) in names.iter().enumerate() {
        grid.set_diffusion_coefficient(name, 0.1 * (slot as f64 + 1.0))
            .expect("fixture species exists");
        for y in 0..height {
            for x in 0..width {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let amount = (state >> 56) as i64;
                grid.add_molecule(x, y, name, amount)
                    .expect("fixture cell in range");
            }
        }
    }
    grid
}

/// Per-species totals in slot order.
pub fn species_totals(grid: &DiffusionGrid) -> Vec<u128> {
    grid.species_names()
        .map(|n| grid.species_total(n).expect("name comes from the grid"))
        .collect()
}

/// Run `steps` diffusion steps of `dt` with a fresh generator from `seed`.
pub fn run_steps(grid: &mut DiffusionGrid, dt: f64, steps: usize, seed: u64) {
    let mut rng = seeded_rng(seed);
    for _ in 0..steps {
        grid.diffuse(dt, &mut rng).expect("valid time step");
    }
}
