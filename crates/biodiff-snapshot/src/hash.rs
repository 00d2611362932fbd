//! FNV-1a fingerprint of grid state.
//!
//! Used for fast equality checks between runs (same seed, same state).
//! Not cryptographically secure.

use biodiff_grid::DiffusionGrid;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash the dimensions, species slot boundaries and every count of `grid`.
///
/// Coefficients and cell size are deliberately left out: two grids that
/// hold the same particles in the same places hash equal.
pub fn state_hash(grid: &DiffusionGrid) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, grid.width() as u64);
    hash = fnv1a_u64(hash, grid.height() as u64);
    for (id, _, _) in grid.species().iter() {
        hash = fnv1a_u64(hash, id.index() as u64);
        if let Some(plane) = grid.plane(id) {
            for &v in plane {
                hash = fnv1a_u64(hash, v);
            }
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_state_same_hash() {
        let mut a = DiffusionGrid::with_species(3, 3, ["A", "B"]).unwrap();
        let mut b = DiffusionGrid::with_species(3, 3, ["A", "B"]).unwrap();
        a.add_molecule(1, 2, "A", 5).unwrap();
        b.add_molecule(1, 2, "A", 5).unwrap();
        assert_eq!(state_hash(&a), state_hash(&b));

        // Coefficients do not take part.
        b.set_diffusion_coefficient("A", 3.0).unwrap();
        assert_eq!(state_hash(&a), state_hash(&b));
    }

    #[test]
    fn moved_particle_changes_hash() {
        let mut a = DiffusionGrid::with_species(3, 3, ["A"]).unwrap();
        let mut b = DiffusionGrid::with_species(3, 3, ["A"]).unwrap();
        a.add_molecule(0, 0, "A", 1).unwrap();
        b.add_molecule(1, 0, "A", 1).unwrap();
        assert_ne!(state_hash(&a), state_hash(&b));
    }

    #[test]
    fn species_order_matters() {
        let mut a = DiffusionGrid::with_species(2, 2, ["A", "B"]).unwrap();
        let mut b = DiffusionGrid::with_species(2, 2, ["A", "B"]).unwrap();
        a.add_molecule(0, 0, "A", 1).unwrap();
        b.add_molecule(0, 0, "B", 1).unwrap();
        assert_ne!(state_hash(&a), state_hash(&b));
    }

    #[test]
    fn shape_matters() {
        let a = DiffusionGrid::with_species(2, 3, ["A"]).unwrap();
        let b = DiffusionGrid::with_species(3, 2, ["A"]).unwrap();
        assert_ne!(state_hash(&a), state_hash(&b));
    }
}
