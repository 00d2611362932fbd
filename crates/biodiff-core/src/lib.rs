//! Core types for the biodiff stochastic diffusion workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the species registry, grid configuration, identifiers and the error
//! type shared by every other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;
pub mod species;

pub use config::{DiffusionScheme, GridConfig};
pub use error::GridError;
pub use id::SpeciesId;
pub use species::SpeciesRegistry;
