//! biodiff quickstart: a signalling molecule spreading from a colony.
//!
//! Demonstrates:
//!   1. Building a grid with two species
//!   2. Setting diffusion coefficients and seeding particles
//!   3. Stepping with a seeded generator
//!   4. Reading concentrations, totals and the state hash
//!   5. Snapshot round trip
//!
//! Run with:
//!   RUST_LOG=biodiff_grid=debug cargo run --example quickstart

use biodiff::prelude::*;
use biodiff::snapshot::{from_bytes, to_bytes};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── Grid parameters ────────────────────────────────────────────

const WIDTH: usize = 16;
const HEIGHT: usize = 9;
const DT: f64 = 1.0;
const STEPS: usize = 40;
const SEED: u64 = 42;

// Colony position (centre of grid).
const COLONY_X: usize = 8;
const COLONY_Y: usize = 4;

fn print_plane(grid: &DiffusionGrid, name: &str) -> Result<(), GridError> {
    for y in 0..grid.height() {
        let row = (0..grid.width())
            .map(|x| grid.concentration(x, y, name).map(|c| format!("{c:5}")))
            .collect::<Result<Vec<_>, _>>()?;
        println!("  {}", row.join(""));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GridConfig::new(WIDTH, HEIGHT)
        .with_species(["AHL", "GFP"])
        .with_scheme(DiffusionScheme::IndependentBinomial);
    let mut grid = DiffusionGrid::new(config)?;

    // AHL diffuses; GFP stays inside the cells that made it.
    grid.set_diffusion_coefficient("AHL", 0.6)?;
    grid.set_diffusion_coefficient("GFP", 0.0)?;
    grid.add_molecule(COLONY_X, COLONY_Y, "AHL", 5000)?;
    grid.add_molecule(COLONY_X, COLONY_Y, "GFP", 200)?;

    let p = grid.movement_probability("AHL", DT)?;
    info!(p, "per-direction move probability for AHL");

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    for step in 1..=STEPS {
        grid.diffuse(DT, &mut rng)?;
        if step % 10 == 0 {
            println!(
                "step {step:3}: AHL at colony = {:5}, AHL total = {}, hash = {:016x}",
                grid.concentration(COLONY_X, COLONY_Y, "AHL")?,
                grid.species_total("AHL")?,
                state_hash(&grid),
            );
        }
    }

    println!("\nAHL after {STEPS} steps:");
    print_plane(&grid, "AHL")?;
    println!(
        "GFP still at colony: {}",
        grid.concentration(COLONY_X, COLONY_Y, "GFP")?
    );

    let bytes = to_bytes(&GridSnapshot::capture(&grid))?;
    let restored = from_bytes(&bytes)?.restore()?;
    println!(
        "\nsnapshot: {} bytes, restored hash matches: {}",
        bytes.len(),
        state_hash(&restored) == state_hash(&grid)
    );

    Ok(())
}
