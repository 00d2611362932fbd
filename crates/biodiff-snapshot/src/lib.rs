//! Exact snapshots of diffusion grid state.
//!
//! A [`GridSnapshot`] captures everything needed to rebuild a grid:
//! dimensions, cell size, sampling scheme, species with coefficients and
//! every particle count. Snapshots encode to a compact binary form and
//! decode back without loss.
//!
//! # Format
//!
//! ```text
//! [MAGIC "BDIF"] [VERSION u8]
//! [width u32] [height u32] [cell_size f64] [scheme u8]
//! [species u32] ([name len u32][name bytes][coefficient f64]) * species
//! [counts u64] * (width * height * species)
//! ```
//!
//! All integers and floats are little-endian. Counts are species-major,
//! then row-major.
//!
//! [`state_hash`] gives a cheap FNV-1a fingerprint of a grid for
//! determinism checks without a full comparison.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;
pub mod snapshot;

pub use codec::{decode, encode, from_bytes, to_bytes};
pub use error::SnapshotError;
pub use hash::state_hash;
pub use snapshot::{GridSnapshot, SpeciesEntry};

/// Magic bytes at the start of every encoded snapshot.
pub const MAGIC: [u8; 4] = *b"BDIF";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
