//! Stochastic integer diffusion step.
//!
//! Each mobile species moves independently. For coefficient `D`, time
//! step `dt` and cell size `dx`, every particle moves to a given
//! in-grid neighbour with probability
//!
//! ```text
//! p = min(D * dt / (4 * dx^2), 0.25)
//! ```
//!
//! All draws read the tick-start counts and write into a separate output
//! buffer that replaces the grid's counts only once the whole step has
//! succeeded. Edge cells have no outward exchange, so the grid is closed.

use crate::grid::DiffusionGrid;
use crate::neighbours::neighbours_flat;
use biodiff_core::{DiffusionScheme, GridConfig, GridError};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Binomial, Distribution};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Per-direction movement probability for one species.
///
/// Non-positive coefficients and time steps give 0.0. The result never exceeds
/// [`GridConfig::MAX_PROBABILITY`], whatever the inputs.
///
/// # Examples
///
/// ```
/// use biodiff_grid::movement_probability;
///
/// assert_eq!(movement_probability(0.1, 1.0, 1.0), 0.025);
/// assert_eq!(movement_probability(1e9, 1e9, 1.0), 0.25);
/// assert_eq!(movement_probability(-3.0, 1.0, 1.0), 0.0);
/// ```
pub fn movement_probability(coefficient: f64, dt: f64, cell_size: f64) -> f64 {
    if coefficient <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    let p = (coefficient * dt) / (4.0 * cell_size * cell_size);
    // 0/0 when both products underflow.
    if p.is_nan() {
        return 0.0;
    }
    p.min(GridConfig::MAX_PROBABILITY)
}

fn binomial(n: u64, p: f64) -> Result<Binomial, GridError> {
    Binomial::new(n, p).map_err(|e| GridError::InvalidParameter {
        reason: format!("binomial(n={n}, p={p}) rejected: {e}"),
    })
}

fn deposit(next: &mut [u64], dst: usize, movers: u64) -> Result<(), GridError> {
    next[dst] = next[dst]
        .checked_add(movers)
        .ok_or_else(|| GridError::InvalidParameter {
            reason: format!(
                "diffusion would push the count of cell {dst} past u64::MAX; \
                 the grid holds too many particles to step"
            ),
        })?;
    Ok(())
}

/// Four independent directional draws per cell, each against the cell's
/// tick-start count.
///
/// When the draws add up to more than the cell holds, the directions are
/// charged against the count in a random order, so the cut falls on every
/// direction with equal chance.
fn step_independent<R: Rng + ?Sized>(
    current: &[u64],
    next: &mut [u64],
    rows: usize,
    cols: usize,
    p: f64,
    rng: &mut R,
) -> Result<(), GridError> {
    for r in 0..rows {
        for c in 0..cols {
            let src = r * cols + c;
            let n = current[src];
            if n == 0 {
                continue;
            }
            let dsts = neighbours_flat(r, c, rows, cols);
            let dist = binomial(n, p)?;
            let mut movers: SmallVec<[u64; 4]> = dsts.iter().map(|_| dist.sample(&mut *rng)).collect();

            let drawn: u128 = movers.iter().map(|&m| m as u128).sum();
            if drawn > n as u128 {
                let mut order: SmallVec<[usize; 4]> = (0..movers.len()).collect();
                order.shuffle(rng);
                let mut budget = n;
                for k in order {
                    movers[k] = movers[k].min(budget);
                    budget -= movers[k];
                }
            }

            for (&dst, &m) in dsts.iter().zip(&movers) {
                next[src] -= m;
                deposit(next, dst, m)?;
            }
        }
    }
    Ok(())
}

/// One multinomial draw per cell over {in-grid neighbours, stay}.
///
/// Sampled as a chain of conditional binomials: after `k` directions the
/// remaining probability mass is `1 - k*p`, so the next direction takes
/// `Binomial(remaining, p / (1 - k*p))`.
fn step_multinomial<R: Rng + ?Sized>(
    current: &[u64],
    next: &mut [u64],
    rows: usize,
    cols: usize,
    p: f64,
    rng: &mut R,
) -> Result<(), GridError> {
    for r in 0..rows {
        for c in 0..cols {
            let src = r * cols + c;
            let mut remaining = current[src];
            let mut mass = 1.0;
            for dst in neighbours_flat(r, c, rows, cols) {
                if remaining == 0 {
                    break;
                }
                let q = (p / mass).min(1.0);
                let movers = binomial(remaining, q)?.sample(rng);
                remaining -= movers;
                mass -= p;
                next[src] -= movers;
                deposit(next, dst, movers)?;
            }
        }
    }
    Ok(())
}

impl DiffusionGrid {
    /// Per-direction movement probability `name` would use for a step of `dt`.
    pub fn movement_probability(&self, name: &str, dt: f64) -> Result<f64, GridError> {
        let d = self.species.coefficient(name)?;
        Ok(movement_probability(d, dt, self.cell_size))
    }

    /// Advance every mobile species by one diffusion step of length `dt`.
    ///
    /// Species with a non-positive coefficient are skipped and consume no
    /// randomness; so is every species when `dt == 0`. Per-species totals
    /// are conserved exactly and no count ever goes negative.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `dt` is negative or not finite, or if a cell
    /// near `u64::MAX` would receive particles that overflow its count
    /// (only reachable after saturating `add_molecule` calls). The grid is
    /// unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use biodiff_grid::DiffusionGrid;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut grid = DiffusionGrid::with_species(10, 10, ["AHL"]).unwrap();
    /// grid.set_diffusion_coefficient("AHL", 1.0).unwrap();
    /// grid.add_molecule(5, 5, "AHL", 500).unwrap();
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// grid.diffuse(1.0, &mut rng).unwrap();
    ///
    /// assert!(grid.concentration(5, 5, "AHL").unwrap() < 500);
    /// assert_eq!(grid.species_total("AHL").unwrap(), 500);
    /// ```
    pub fn diffuse<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) -> Result<(), GridError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(GridError::InvalidParameter {
                reason: format!("time step must be finite and >= 0, got {dt}"),
            });
        }

        let rows = self.height;
        let cols = self.width;
        let cells = self.cell_count();
        let mut next = self.counts.clone();
        let mut mobile = 0usize;

        for (id, name, d) in self.species.iter() {
            let p = movement_probability(d, dt, self.cell_size);
            if p <= 0.0 {
                continue;
            }
            mobile += 1;
            trace!(
                species = name,
                slot = %id,
                p,
                capped = p >= GridConfig::MAX_PROBABILITY,
                "diffusing species"
            );

            let range = id.index() * cells..(id.index() + 1) * cells;
            let current = &self.counts[range.clone()];
            let out = &mut next[range];
            match self.scheme {
                DiffusionScheme::IndependentBinomial => {
                    step_independent(current, out, rows, cols, p, rng)?
                }
                DiffusionScheme::Multinomial => {
                    step_multinomial(current, out, rows, cols, p, rng)?
                }
            }
        }

        debug!(dt, mobile, "diffusion step");
        self.counts = next;
        Ok(())
    }
}
