//! Integer-count 2D diffusion grid.
//!
//! [`DiffusionGrid`] stores a discrete particle count per cell and species
//! and advances all mobile species by one stochastic random-walk step per
//! [`diffuse`](DiffusionGrid::diffuse) call. Randomness is injected by the
//! caller, so a seeded generator gives a reproducible run.
//!
//! The grid is closed: particles never cross its edges, and each species'
//! total is conserved exactly by every step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diffusion;
pub mod grid;
pub(crate) mod neighbours;

pub use diffusion::movement_probability;
pub use grid::DiffusionGrid;
