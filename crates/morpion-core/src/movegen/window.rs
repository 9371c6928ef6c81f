//! Legality and priority of a single placement.

use crate::grid::Grid;
use crate::line_move::{Move, SEGMENT_LEN};

use super::Priority;

/// Check whether `mv` is legal on `grid` and, if so, classify it.
///
/// A move is legal when its placed point is empty, the other four segment
/// points are occupied, no interior point already carries a segment in this
/// direction, and neither end has already been used in the direction the
/// segment would extend. Off-lattice points read as walls and reject the move.
pub(crate) fn evaluate(grid: &Grid, mv: Move) -> Option<Priority> {
    let dir = mv.direction();
    let placed = SEGMENT_LEN as usize - 1 - mv.offset() as usize;
    let segment = mv.segment();
    let cells = segment.map(|(x, y)| grid.cell(x, y));

    let (lower, upper) = (cells[0], cells[4]);
    if lower.forward_used(dir) || upper.backward_used(dir) {
        return None;
    }
    if cells[1..4].iter().any(|c| c.has(dir.through_bits())) {
        return None;
    }
    for (i, cell) in cells.iter().enumerate() {
        let usable = if i == placed { cell.is_empty() } else { cell.is_occupied() };
        if !usable {
            return None;
        }
    }

    // An end already used the other way means this segment extends an
    // existing line: no other move at this point in this direction can beat it.
    if lower.backward_used(dir) || upper.forward_used(dir) {
        return Some(Priority::Forced);
    }

    // A line ending one to three points beyond either end would be blocked
    // from reaching this segment later.
    let low = mv.offset() as i32 - (SEGMENT_LEN - 1);
    let high = mv.offset() as i32;
    let blocked_below = (1..=3).any(|s| {
        let (x, y) = mv.point_at(low - s);
        grid.cell(x, y).backward_used(dir)
    });
    let blocked_above = (1..=3).any(|s| {
        let (x, y) = mv.point_at(high + s);
        grid.cell(x, y).forward_used(dir)
    });
    if blocked_below || blocked_above {
        Some(Priority::Weak)
    } else {
        Some(Priority::Neutral)
    }
}
