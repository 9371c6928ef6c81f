//! Errors raised by the legality engine and move application.
//!
//! Every variant signals a broken invariant or an undersized fixed bound,
//! never a condition that valid play can produce.

use crate::line_move::Move;

/// Errors from scanning, applying, or replaying moves on a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The placed point of a move is already occupied.
    #[error("cannot play {mv}: ({x}, {y}) is already occupied")]
    OccupiedTarget {
        /// The offending move.
        mv: Move,
        /// X coordinate of the placed point.
        x: i32,
        /// Y coordinate of the placed point.
        y: i32,
    },
    /// A segment point is empty, off the lattice, or already consumed at the end the move needs.
    #[error("cannot play {mv}: no free support at ({x}, {y})")]
    MissingSupport {
        /// The offending move.
        mv: Move,
        /// X coordinate of the unusable segment point.
        x: i32,
        /// Y coordinate of the unusable segment point.
        y: i32,
    },
    /// A fixed-size store is full.
    #[error("{what} capacity of {capacity} exceeded")]
    CapacityExceeded {
        /// Which store overflowed ("history" or "candidate list").
        what: &'static str,
        /// The store's capacity.
        capacity: usize,
    },
    /// A legal move was found within one point of the lattice edge.
    #[error("lattice too small: legal move {mv} found at the edge")]
    LatticeTooSmall {
        /// The move found on the rim.
        mv: Move,
    },
    /// A candidate index does not exist in the current list.
    #[error("candidate index {index} out of range (list holds {count})")]
    NoSuchCandidate {
        /// The requested index.
        index: usize,
        /// Number of candidates in the list.
        count: usize,
    },
    /// A recorded move is absent from the regenerated candidate list.
    #[error("recorded move {mv} (step {step}) not found among legal moves")]
    MoveNotFound {
        /// Zero-based position of the move in the recorded history.
        step: usize,
        /// The recorded move.
        mv: Move,
    },
    /// A replay was asked to continue from a position whose history is not a
    /// prefix of the recorded game.
    #[error("starting position ({start} moves) is not a prefix of the recorded game ({recorded} moves)")]
    NotAPrefix {
        /// Moves already played in the starting position.
        start: usize,
        /// Moves in the recorded game.
        recorded: usize,
    },
}
