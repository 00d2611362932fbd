//! biodiff: stochastic particle diffusion on 2D grids.
//!
//! This is the facade crate that re-exports the public API of the
//! biodiff sub-crates. Adding `biodiff` as a single dependency is enough
//! for most users.
//!
//! # Quick start
//!
//! ```rust
//! use biodiff::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut grid = DiffusionGrid::with_species(8, 8, ["AHL"]).unwrap();
//! grid.set_diffusion_coefficient("AHL", 0.4).unwrap();
//! grid.add_molecule(4, 4, "AHL", 1000).unwrap();
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! for _ in 0..20 {
//!     grid.diffuse(1.0, &mut rng).unwrap();
//! }
//! assert_eq!(grid.species_total("AHL").unwrap(), 1000);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `biodiff-core` | Species IDs, registry, configuration, errors |
//! | [`grid`] | `biodiff-grid` | The diffusion grid and its stepping |
//! | [`snapshot`] | `biodiff-snapshot` | Binary snapshots and state hashing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and configuration (`biodiff-core`).
///
/// Contains [`types::GridConfig`], [`types::SpeciesRegistry`] and the
/// [`types::GridError`] every fallible operation returns.
pub use biodiff_core as types;

/// The diffusion grid (`biodiff-grid`).
///
/// [`grid::DiffusionGrid`] owns the counts and advances them with
/// `diffuse`.
pub use biodiff_grid as grid;

/// Snapshots and fingerprints (`biodiff-snapshot`).
///
/// Capture with [`snapshot::GridSnapshot::capture`], persist with
/// [`snapshot::encode`], compare runs with [`snapshot::state_hash`].
pub use biodiff_snapshot as snapshot;

/// Common imports for typical biodiff usage.
///
/// ```rust
/// use biodiff::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use biodiff_core::{DiffusionScheme, GridConfig, GridError, SpeciesId};

    // Grid
    pub use biodiff_grid::{movement_probability, DiffusionGrid};

    // Snapshots
    pub use biodiff_snapshot::{state_hash, GridSnapshot, SnapshotError};
}
