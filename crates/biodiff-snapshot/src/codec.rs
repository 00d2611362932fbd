//! Binary encode/decode for grid snapshots.
//!
//! All integers and floats are little-endian. Strings are length-prefixed
//! with a `u32` length. No compression, no padding, no schema.

use std::io::{Read, Write};

use biodiff_core::DiffusionScheme;
use tracing::debug;

use crate::error::SnapshotError;
use crate::snapshot::{GridSnapshot, SpeciesEntry};
use crate::{FORMAT_VERSION, MAGIC};

/// Longest species name accepted by the decoder, in bytes.
pub const MAX_NAME_LEN: u32 = 4096;

// ── Primitive writers ───────────────────────────────────────────

fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), SnapshotError> {
    w.write_all(&[v])?;
    Ok(())
}

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), SnapshotError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), SnapshotError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), SnapshotError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), SnapshotError> {
    let len = u32::try_from(s.len()).map_err(|_| SnapshotError::Malformed {
        detail: format!("species name of {} bytes is too long", s.len()),
    })?;
    write_u32_le(w, len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

fn read_u8(r: &mut dyn Read) -> Result<u8, SnapshotError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32_le(r: &mut dyn Read) -> Result<u32, SnapshotError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64_le(r: &mut dyn Read) -> Result<u64, SnapshotError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_f64_le(r: &mut dyn Read) -> Result<f64, SnapshotError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, SnapshotError> {
    let len = read_u32_le(r)?;
    if len > MAX_NAME_LEN {
        return Err(SnapshotError::Malformed {
            detail: format!("species name length {len} exceeds {MAX_NAME_LEN}"),
        });
    }
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| SnapshotError::Malformed {
        detail: format!("invalid UTF-8 species name: {e}"),
    })
}

// ── Snapshot encode/decode ──────────────────────────────────────

/// Write `snap` to `w` in the current format version.
pub fn encode(w: &mut dyn Write, snap: &GridSnapshot) -> Result<(), SnapshotError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    write_u32_le(w, snap.width)?;
    write_u32_le(w, snap.height)?;
    write_f64_le(w, snap.cell_size)?;
    write_u8(w, snap.scheme.tag())?;

    let species = u32::try_from(snap.species.len()).map_err(|_| SnapshotError::Malformed {
        detail: format!("{} species exceed u32::MAX", snap.species.len()),
    })?;
    write_u32_le(w, species)?;
    for entry in &snap.species {
        write_length_prefixed_str(w, &entry.name)?;
        write_f64_le(w, entry.coefficient)?;
    }

    for &count in &snap.counts {
        write_u64_le(w, count)?;
    }

    debug!(
        species,
        counts = snap.counts.len(),
        "encoded grid snapshot"
    );
    Ok(())
}

/// Read one snapshot from `r`.
///
/// Structural problems (magic, version, tags, lengths, UTF-8) are
/// reported here; grid-level validity is checked by
/// [`GridSnapshot::restore`].
pub fn decode(r: &mut dyn Read) -> Result<GridSnapshot, SnapshotError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SnapshotError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { found: version });
    }

    let width = read_u32_le(r)?;
    let height = read_u32_le(r)?;
    let cell_size = read_f64_le(r)?;
    let tag = read_u8(r)?;
    let scheme = DiffusionScheme::from_tag(tag).ok_or_else(|| SnapshotError::Malformed {
        detail: format!("unknown diffusion scheme tag {tag}"),
    })?;

    let species_count = read_u32_le(r)?;
    let mut species = Vec::new();
    for _ in 0..species_count {
        let name = read_length_prefixed_str(r)?;
        let coefficient = read_f64_le(r)?;
        species.push(SpeciesEntry { name, coefficient });
    }

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|cells| cells.checked_mul(species_count as usize))
        .ok_or_else(|| SnapshotError::Malformed {
            detail: format!("{width}x{height}x{species_count} count array overflows usize"),
        })?;
    // Grows with the data actually present rather than trusting the header.
    let mut counts = Vec::new();
    for _ in 0..len {
        counts.push(read_u64_le(r)?);
    }

    debug!(width, height, species = species_count, "decoded grid snapshot");
    Ok(GridSnapshot {
        width,
        height,
        cell_size,
        scheme,
        species,
        counts,
    })
}

/// Encode `snap` into a fresh buffer.
pub fn to_bytes(snap: &GridSnapshot) -> Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::new();
    encode(&mut buf, snap)?;
    Ok(buf)
}

/// Decode exactly one snapshot from `bytes`, rejecting trailing data.
pub fn from_bytes(bytes: &[u8]) -> Result<GridSnapshot, SnapshotError> {
    let mut cursor = bytes;
    let snap = decode(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(SnapshotError::Malformed {
            detail: format!("{} trailing bytes after snapshot", cursor.len()),
        });
    }
    Ok(snap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridSnapshot {
        GridSnapshot {
            width: 2,
            height: 1,
            cell_size: 0.25,
            scheme: DiffusionScheme::Multinomial,
            species: vec![
                SpeciesEntry {
                    name: "AHL".into(),
                    coefficient: 0.1,
                },
                SpeciesEntry {
                    name: "LuxR".into(),
                    coefficient: -1.0,
                },
            ],
            counts: vec![0, 1, u64::MAX, 42],
        }
    }

    #[test]
    fn header_layout() {
        let bytes = to_bytes(&sample()).unwrap();
        assert_eq!(&bytes[..4], b"BDIF");
        assert_eq!(bytes[4], FORMAT_VERSION);
        assert_eq!(&bytes[5..9], &2u32.to_le_bytes());
        assert_eq!(&bytes[9..13], &1u32.to_le_bytes());
        assert_eq!(&bytes[13..21], &0.25f64.to_le_bytes());
        assert_eq!(bytes[21], DiffusionScheme::Multinomial.tag());
        assert_eq!(&bytes[22..26], &2u32.to_le_bytes());
        // 26 header + (4+3+8) + (4+4+8) species + 4*8 counts
        assert_eq!(bytes.len(), 26 + 15 + 16 + 32);
    }

    #[test]
    fn round_trip_is_exact() {
        let snap = sample();
        let decoded = from_bytes(&to_bytes(&snap).unwrap()).unwrap();
        assert_eq!(decoded, snap);
    }

    #[test]
    fn bad_magic_rejected() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(from_bytes(&bytes), Err(SnapshotError::InvalidMagic)));
    }

    #[test]
    fn future_version_rejected() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[4] = FORMAT_VERSION + 1;
        assert!(matches!(
            from_bytes(&bytes),
            Err(SnapshotError::UnsupportedVersion { found }) if found == FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn unknown_scheme_tag_rejected() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[21] = 9;
        assert!(matches!(
            from_bytes(&bytes),
            Err(SnapshotError::Malformed { .. })
        ));
    }

    #[test]
    fn truncated_input_is_io_error() {
        let bytes = to_bytes(&sample()).unwrap();
        let cut = &bytes[..bytes.len() - 3];
        assert!(matches!(from_bytes(cut), Err(SnapshotError::Io(_))));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes.push(0);
        assert!(matches!(
            from_bytes(&bytes),
            Err(SnapshotError::Malformed { .. })
        ));
    }

    #[test]
    fn oversized_name_rejected() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[26..30].copy_from_slice(&(MAX_NAME_LEN + 1).to_le_bytes());
        assert!(matches!(
            from_bytes(&bytes),
            Err(SnapshotError::Malformed { .. })
        ));
    }
}
