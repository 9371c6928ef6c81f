//! The lattice: point states, move history, and the current candidate list.

use std::fmt;

use crate::cell::Cell;
use crate::dump::PrettyGrid;
use crate::line_move::Move;
use crate::movegen::CandidateList;

/// Side of the square lattice.
pub const GRID_SIZE: usize = 64;

/// Maximum number of moves a history may hold.
pub const HISTORY_CAPACITY: usize = 1000;

/// The 36-point Greek cross ("5T" start), row index = x, column index = y.
const START_SHAPE: [&str; 10] = [
    "...####...",
    "...#..#...",
    "...#..#...",
    "####..####",
    "#........#",
    "#........#",
    "####..####",
    "...#..#...",
    "...#..#...",
    "...####...",
];

/// Lowest x and y of the start shape's bounding box; centers the cross on the lattice.
const START_CORNER: usize = (GRID_SIZE - START_SHAPE.len()) / 2;

/// Complete game state: occupancy and consumption bits, the moves played so
/// far, and the legal moves of the current position.
///
/// Cloning produces a fully independent snapshot.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Point states, indexed by `x * GRID_SIZE + y`.
    cells: Vec<Cell>,
    /// Moves played from the start position, oldest first.
    pub(crate) history: Vec<Move>,
    /// Legal moves of this position, as of the last scan.
    pub(crate) candidates: CandidateList,
}

impl Grid {
    /// Return an empty lattice with no history.
    pub fn empty() -> Grid {
        Grid {
            cells: vec![Cell::EMPTY; GRID_SIZE * GRID_SIZE],
            history: Vec::new(),
            candidates: CandidateList::new(),
        }
    }

    /// Return the standard starting position.
    ///
    /// The candidate list is empty until the first scan.
    pub fn starting_position() -> Grid {
        let mut grid = Grid::empty();
        grid.reset();
        grid
    }

    /// Reset to the starting position: clear every point, history, and
    /// candidates, then place the start cross.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.history.clear();
        self.candidates.clear();
        for (row, line) in START_SHAPE.iter().enumerate() {
            for (col, c) in line.bytes().enumerate() {
                if c == b'#' {
                    let idx = Self::index(START_CORNER + row, START_CORNER + col);
                    self.cells[idx] = Cell::POINT;
                }
            }
        }
    }

    #[inline]
    const fn index(x: usize, y: usize) -> usize {
        x * GRID_SIZE + y
    }

    /// Return `true` if `(x, y)` lies on the lattice.
    #[inline]
    pub const fn contains(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE
    }

    /// Return the state of `(x, y)`, or [`Cell::WALL`] off the lattice.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if Self::contains(x, y) {
            self.cells[Self::index(x as usize, y as usize)]
        } else {
            Cell::WALL
        }
    }

    /// Mutable access to an on-lattice point.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is off the lattice.
    #[inline]
    pub(crate) fn cell_mut(&mut self, x: i32, y: i32) -> &mut Cell {
        debug_assert!(Self::contains(x, y));
        &mut self.cells[Self::index(x as usize, y as usize)]
    }

    /// Return all point states in index order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Overwrite this grid's points and history with those of `source`.
    ///
    /// The candidate list is left untouched; it is rebuilt by the next scan.
    pub(crate) fn copy_position_from(&mut self, source: &Grid) {
        self.cells.copy_from_slice(&source.cells);
        self.history.clear();
        self.history.extend_from_slice(&source.history);
    }

    /// Moves played from the starting position, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves played.
    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Legal moves of this position, as of the last scan.
    #[inline]
    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Return `true` if the last scan found no legal move.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of occupied points.
    pub fn point_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Iterate over the coordinates of every occupied point.
    pub fn occupied_points(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_occupied())
            .map(|(i, _)| ((i / GRID_SIZE) as i32, (i % GRID_SIZE) as i32))
    }

    /// Bounding box `(min_x, max_x, min_y, max_y)` of the occupied points.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        self.occupied_points().fold(None, |acc, (x, y)| match acc {
            None => Some((x, x, y, y)),
            Some((x0, x1, y0, y1)) => Some((x0.min(x), x1.max(x), y0.min(y), y1.max(y))),
        })
    }

    /// Deterministic, non-cryptographic hash of the point states:
    /// the sum of `value * x * y` over every point.
    pub fn signature(&self) -> u64 {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let (x, y) = ((i / GRID_SIZE) as u64, (i % GRID_SIZE) as u64);
                c.bits() as u64 * x * y
            })
            .sum()
    }

    /// Return a pretty-printable diagnostic dump of this grid.
    pub fn pretty(&self) -> PrettyGrid<'_> {
        PrettyGrid::new(self)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("points", &self.point_count())
            .field("moves_played", &self.moves_played())
            .field("candidates", &self.candidates.len())
            .field("signature", &self.signature())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{GRID_SIZE, Grid};
    use crate::cell::Cell;

    #[test]
    fn starting_position_has_36_points() {
        let grid = Grid::starting_position();
        assert_eq!(grid.point_count(), 36);
        assert_eq!(grid.moves_played(), 0);
        assert!(grid.candidates().is_empty());
    }

    #[test]
    fn starting_position_is_centered() {
        let grid = Grid::starting_position();
        assert_eq!(grid.bounds(), Some((27, 36, 27, 36)));
        // Arms of the cross
        assert!(grid.cell(27, 30).is_occupied());
        assert!(grid.cell(30, 27).is_occupied());
        assert!(grid.cell(36, 33).is_occupied());
        // Hollow center
        assert!(grid.cell(31, 31).is_empty());
        // Corners of the bounding box are outside the cross
        assert!(grid.cell(27, 27).is_empty());
    }

    #[test]
    fn starting_signature_is_stable() {
        assert_eq!(Grid::starting_position().signature(), 35_721);
        assert_eq!(
            Grid::starting_position().signature(),
            Grid::default().signature()
        );
    }

    #[test]
    fn reset_clears_history() {
        let mut grid = Grid::starting_position();
        grid.history.push(crate::Move::new(31, 31, crate::Direction::Vertical, 0));
        *grid.cell_mut(5, 5) = Cell::POINT;
        grid.reset();
        assert_eq!(grid.moves_played(), 0);
        assert!(grid.cell(5, 5).is_empty());
        assert_eq!(grid, Grid::starting_position());
    }

    #[test]
    fn off_lattice_reads_wall() {
        let grid = Grid::starting_position();
        assert_eq!(grid.cell(-1, 3), Cell::WALL);
        assert_eq!(grid.cell(3, GRID_SIZE as i32), Cell::WALL);
        assert_eq!(grid.cell(0, 0), Cell::EMPTY);
    }

    #[test]
    fn clone_is_independent() {
        let original = Grid::starting_position();
        let mut copy = original.clone();
        *copy.cell_mut(10, 10) = Cell::POINT;
        assert!(original.cell(10, 10).is_empty());
        assert!(copy.cell(10, 10).is_occupied());
    }
}
