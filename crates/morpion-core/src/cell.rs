//! Per-point state: occupancy plus eight segment-consumption bits.

use std::fmt;

use crate::direction::Direction;

/// State of one lattice point, stored as a 9-bit field in a `u16`.
///
/// ```text
/// bit  0:    occupied
/// bits 1-4:  forward end consumed   (one bit per direction)
/// bits 5-8:  backward end consumed  (one bit per direction)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell(u16);

impl Cell {
    /// An empty point.
    pub const EMPTY: Cell = Cell(0);
    /// A freshly placed point with no segment through it.
    pub const POINT: Cell = Cell(1);
    /// Value read for coordinates outside the lattice. Every bit is set,
    /// so no segment can ever use a wall point.
    pub const WALL: Cell = Cell(1023);

    const OCCUPIED: u16 = 1;

    /// Create a cell from raw bits.
    #[inline]
    pub const fn new(bits: u16) -> Cell {
        Cell(bits)
    }

    /// Return the raw bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Return `true` if no point and no consumption bit is present.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if a point has been placed here.
    #[inline]
    pub const fn is_occupied(self) -> bool {
        self.0 & Self::OCCUPIED != 0
    }

    /// Return `true` if any bit of `mask` is set.
    #[inline]
    pub const fn has(self, mask: u16) -> bool {
        self.0 & mask != 0
    }

    /// Return `true` if the forward end in `dir` is consumed.
    #[inline]
    pub const fn forward_used(self, dir: Direction) -> bool {
        self.has(dir.forward_bit())
    }

    /// Return `true` if the backward end in `dir` is consumed.
    #[inline]
    pub const fn backward_used(self, dir: Direction) -> bool {
        self.has(dir.backward_bit())
    }

    /// Set the bits of `mask`.
    #[inline]
    pub(crate) fn insert(&mut self, mask: u16) {
        self.0 |= mask;
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({:#011b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use crate::direction::Direction;

    #[test]
    fn empty_and_point() {
        assert!(Cell::EMPTY.is_empty());
        assert!(!Cell::EMPTY.is_occupied());
        assert!(Cell::POINT.is_occupied());
        assert!(!Cell::POINT.is_empty());
    }

    #[test]
    fn wall_blocks_every_direction() {
        for dir in Direction::ALL {
            assert!(Cell::WALL.forward_used(dir));
            assert!(Cell::WALL.backward_used(dir));
        }
        assert!(Cell::WALL.is_occupied());
    }

    #[test]
    fn insert_sets_bits() {
        let mut cell = Cell::POINT;
        cell.insert(Direction::Horizontal.forward_bit());
        assert!(cell.forward_used(Direction::Horizontal));
        assert!(!cell.backward_used(Direction::Horizontal));
        assert!(!cell.forward_used(Direction::Vertical));
        assert_eq!(cell.bits(), 9);
    }
}
