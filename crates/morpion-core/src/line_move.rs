//! Move representation, packed into a decimal key.

use std::fmt;

use crate::direction::Direction;

/// Number of points in a segment.
pub const SEGMENT_LEN: i32 = 5;

/// A move: place a point at `(x, y)` and draw the 5-point segment through it.
///
/// The segment covers `(x, y) + a * step(direction)` for
/// `a in offset - 4 ..= offset`, so `offset` is the new point's distance
/// from the segment's upper end (0 places the upper end, 4 the lower end).
///
/// Moves are stored as a decimal key so that logs stay human-readable:
///
/// ```text
/// key = x * 10000 + y * 100 + direction * 10 + offset
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u32);

impl Move {
    /// Create a move.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `offset <= 4` and both coordinates are below 100.
    #[inline]
    pub const fn new(x: u8, y: u8, direction: Direction, offset: u8) -> Move {
        debug_assert!(offset < SEGMENT_LEN as u8);
        debug_assert!(x < 100 && y < 100);
        Move(x as u32 * 10_000 + y as u32 * 100 + direction as u32 * 10 + offset as u32)
    }

    /// Decode a key, returning `None` if any digit group is out of range.
    pub const fn from_key(key: u32) -> Option<Move> {
        let x = key / 10_000;
        let direction = (key % 100) / 10;
        let offset = key % 10;
        if x >= 100 || direction >= Direction::COUNT as u32 || offset >= SEGMENT_LEN as u32 {
            return None;
        }
        Some(Move(key))
    }

    /// Return the packed key.
    #[inline]
    pub const fn key(self) -> u32 {
        self.0
    }

    /// X coordinate of the placed point.
    #[inline]
    pub const fn x(self) -> u8 {
        (self.0 / 10_000) as u8
    }

    /// Y coordinate of the placed point.
    #[inline]
    pub const fn y(self) -> u8 {
        ((self.0 % 10_000) / 100) as u8
    }

    /// Orientation of the drawn segment.
    #[inline]
    pub const fn direction(self) -> Direction {
        match Direction::from_index(((self.0 % 100) / 10) as u8) {
            Some(dir) => dir,
            None => Direction::Vertical,
        }
    }

    /// Position of the placed point within its segment (0..=4).
    #[inline]
    pub const fn offset(self) -> u8 {
        (self.0 % 10) as u8
    }

    /// Lattice point at distance `a` from the placed point along the segment's direction.
    #[inline]
    pub const fn point_at(self, a: i32) -> (i32, i32) {
        let dir = self.direction();
        (self.x() as i32 + a * dir.dx(), self.y() as i32 + a * dir.dy())
    }

    /// Lower end of the segment (consumes the forward bit).
    #[inline]
    pub const fn lower_end(self) -> (i32, i32) {
        self.point_at(self.offset() as i32 - (SEGMENT_LEN - 1))
    }

    /// Upper end of the segment (consumes the backward bit).
    #[inline]
    pub const fn upper_end(self) -> (i32, i32) {
        self.point_at(self.offset() as i32)
    }

    /// The five segment points, from the lower end to the upper end.
    pub fn segment(self) -> [(i32, i32); SEGMENT_LEN as usize] {
        let low = self.offset() as i32 - (SEGMENT_LEN - 1);
        std::array::from_fn(|i| self.point_at(low + i as i32))
    }

    /// Return `true` if both moves place the same point in the same direction.
    #[inline]
    pub const fn same_placement(self, other: Move) -> bool {
        self.0 / 10 == other.0 / 10
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} d={} k={}",
            self.x(),
            self.y(),
            self.direction().index(),
            self.offset()
        )
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.0, self)
    }
}
