//! Error types for snapshot encoding, decoding and restore.

use biodiff_core::GridError;
use std::io;
use thiserror::Error;

/// Errors that can occur while writing, reading or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// An I/O error occurred during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The data does not start with the expected `b"BDIF"` magic bytes.
    #[error("invalid magic bytes (expected b\"BDIF\")")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version {found}")]
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },
    /// The data is structurally broken (bad UTF-8, unknown tag, size overflow).
    #[error("malformed snapshot: {detail}")]
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The decoded record does not describe a valid grid.
    #[error("snapshot does not describe a valid grid: {0}")]
    Grid(#[from] GridError),
}
