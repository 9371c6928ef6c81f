//! The four line orientations of the lattice.

use std::fmt;

/// A line orientation. Each direction points "forward" along its step vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Step `(0, +1)`.
    Vertical = 0,
    /// Step `(+1, +1)`.
    Diagonal = 1,
    /// Step `(+1, 0)`.
    Horizontal = 2,
    /// Step `(+1, -1)`.
    AntiDiagonal = 3,
}

impl Direction {
    /// Total number of directions.
    pub const COUNT: usize = 4;

    /// All directions in index order.
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Diagonal,
        Direction::Horizontal,
        Direction::AntiDiagonal,
    ];

    /// Create a direction from its index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Direction> {
        match index {
            0 => Some(Direction::Vertical),
            1 => Some(Direction::Diagonal),
            2 => Some(Direction::Horizontal),
            3 => Some(Direction::AntiDiagonal),
            _ => None,
        }
    }

    /// Return the index (0..3).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Step along the x axis.
    #[inline]
    pub const fn dx(self) -> i32 {
        match self {
            Direction::Vertical => 0,
            _ => 1,
        }
    }

    /// Step along the y axis.
    #[inline]
    pub const fn dy(self) -> i32 {
        match self {
            Direction::Vertical | Direction::Diagonal => 1,
            Direction::Horizontal => 0,
            Direction::AntiDiagonal => -1,
        }
    }

    /// Cell bit marking that a segment leaves this point going forward.
    ///
    /// Set on the lower end of a drawn segment.
    #[inline]
    pub const fn forward_bit(self) -> u16 {
        2 << self as u16
    }

    /// Cell bit marking that a segment reaches this point from behind.
    ///
    /// Set on the upper end of a drawn segment.
    #[inline]
    pub const fn backward_bit(self) -> u16 {
        32 << self as u16
    }

    /// Both consumption bits; set on the three interior points of a segment.
    #[inline]
    pub const fn through_bits(self) -> u16 {
        self.forward_bit() | self.backward_bit()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Direction::Vertical => '|',
            Direction::Diagonal => '/',
            Direction::Horizontal => '-',
            Direction::AntiDiagonal => '\\',
        };
        write!(f, "{c}")
    }
}
