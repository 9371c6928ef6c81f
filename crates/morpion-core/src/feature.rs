//! Feature codes: the policy-table key of a move.

use crate::grid::GRID_SIZE;
use crate::line_move::Move;

/// Number of distinct feature codes. Every code is strictly below this bound.
pub const FEATURE_COUNT: usize = GRID_SIZE * GRID_SIZE * 4;

/// Rank of a lattice point used to order the two segment ends.
#[inline]
fn rank((x, y): (i32, i32)) -> i32 {
    (GRID_SIZE as i32 - 1) * y + x
}

/// Code of a segment whose lower-ranked end is `a` and other end is `b`.
///
/// Only segments running towards increasing x from `a` keep a positional
/// code. The rest collapse to a constant per end-to-end relation: every
/// vertical segment is 1, every anti-diagonal one is 3.
#[inline]
fn segment_code(a: (i32, i32), b: (i32, i32)) -> i32 {
    if a.0 < b.0 {
        4 * rank(a)
    } else if a.0 == b.0 {
        1
    } else if a.1 > b.1 {
        2
    } else {
        3
    }
}

/// Compute the feature code of a move.
///
/// The code depends only on the two ends of the drawn segment, so every move
/// that draws the same segment (whatever point it places) shares one policy
/// weight. Ends are ordered by rank, ties going to the lower end.
pub fn feature_code(mv: Move) -> u16 {
    let upper = mv.upper_end();
    let lower = mv.lower_end();
    let code = if rank(upper) < rank(lower) {
        segment_code(upper, lower)
    } else {
        segment_code(lower, upper)
    };
    debug_assert!((0..FEATURE_COUNT as i32).contains(&code), "code {code} for {mv}");
    code as u16
}
