//! Cardinal-direction neighbour lookup on a closed (no-flux) grid.
//!
//! Out-of-grid neighbours do not exist: edge cells simply have fewer
//! exchanges, so nothing ever leaves the grid.

use smallvec::SmallVec;

/// One of the four exchange directions, in the order a step processes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// `(d_row, d_col)` offset.
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }

    /// Flat index of the neighbour of `(row, col)` in this direction,
    /// or `None` if it would fall outside the grid.
    pub(crate) fn neighbour(self, row: usize, col: usize, rows: usize, cols: usize) -> Option<usize> {
        let (dr, dc) = self.offset();
        let nr = row.checked_add_signed(dr).filter(|&r| r < rows)?;
        let nc = col.checked_add_signed(dc).filter(|&c| c < cols)?;
        Some(nr * cols + nc)
    }
}

/// Flat indices of the in-grid neighbours of `(row, col)`, in
/// [`Direction::ALL`] order.
pub(crate) fn neighbours_flat(row: usize, col: usize, rows: usize, cols: usize) -> SmallVec<[usize; 4]> {
    Direction::ALL
        .iter()
        .filter_map(|d| d.neighbour(row, col, rows, cols))
        .collect()
}
