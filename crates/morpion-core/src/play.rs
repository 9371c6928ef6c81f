//! Move execution, in place or copy-make into a reusable target grid.

use tracing::error;

use crate::cell::Cell;
use crate::error::GridError;
use crate::grid::{Grid, HISTORY_CAPACITY};
use crate::line_move::{Move, SEGMENT_LEN};

impl Grid {
    /// Play candidate `index` of the current list on this grid.
    ///
    /// A dominated candidate is redirected to its dominator. Returns the move
    /// actually played. The candidate list is stale afterwards; rescan before
    /// choosing again.
    pub fn play(&mut self, index: usize) -> Result<Move, GridError> {
        let mv = self.candidates.resolve(index)?;
        self.apply(mv)?;
        Ok(mv)
    }

    /// Copy this position into `target`, then play candidate `index` there.
    ///
    /// `target`'s candidate list is left untouched; follow with
    /// [`Grid::search_moves_incremental`] against `self`.
    pub fn play_into(&self, target: &mut Grid, index: usize) -> Result<Move, GridError> {
        let mv = self.candidates.resolve(index)?;
        target.copy_position_from(self);
        target.apply(mv)?;
        Ok(mv)
    }

    /// Append `mv` to the history, place its point, and mark its segment.
    fn apply(&mut self, mv: Move) -> Result<(), GridError> {
        if self.history.len() >= HISTORY_CAPACITY {
            error!(capacity = HISTORY_CAPACITY, %mv, "move history full");
            return Err(GridError::CapacityExceeded {
                what: "history",
                capacity: HISTORY_CAPACITY,
            });
        }
        self.history.push(mv);

        let (x, y) = (mv.x() as i32, mv.y() as i32);
        if !self.cell(x, y).is_empty() {
            error!(%mv, "played point already occupied");
            error!("\n{}", self.pretty());
            return Err(GridError::OccupiedTarget { mv, x, y });
        }
        *self.cell_mut(x, y) = Cell::POINT;

        let dir = mv.direction();
        for (i, (px, py)) in mv.segment().into_iter().enumerate() {
            let mask = match i {
                0 => dir.forward_bit(),
                i if i == SEGMENT_LEN as usize - 1 => dir.backward_bit(),
                _ => dir.through_bits(),
            };
            let cell = self.cell(px, py);
            if !Grid::contains(px, py) || !cell.is_occupied() || cell.has(mask) {
                error!(%mv, x = px, y = py, "segment point cannot support move");
                error!("\n{}", self.pretty());
                return Err(GridError::MissingSupport { mv, x: px, y: py });
            }
            self.cell_mut(px, py).insert(mask);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::Cell;
    use crate::direction::Direction;
    use crate::error::GridError;
    use crate::grid::{Grid, HISTORY_CAPACITY};
    use crate::line_move::Move;

    fn scanned_start() -> Grid {
        let mut grid = Grid::starting_position();
        grid.search_moves().unwrap();
        grid
    }

    #[test]
    fn play_places_point_and_marks_segment() {
        let mut grid = scanned_start();
        let idx = grid
            .candidates()
            .position(crate::Move::new(26, 30, Direction::Horizontal, 4))
            .unwrap();
        let mv = grid.play(idx).unwrap();
        assert_eq!(grid.history(), &[mv]);
        assert_eq!(grid.point_count(), 37);
        let dir = Direction::Horizontal;
        assert!(grid.cell(26, 30).forward_used(dir));
        assert!(grid.cell(27, 30).has(dir.through_bits()));
        assert!(grid.cell(29, 30).has(dir.through_bits()));
        assert!(grid.cell(30, 30).backward_used(dir));
        assert!(!grid.cell(30, 30).forward_used(dir));
    }

    #[test]
    fn play_into_leaves_source_untouched() {
        let start = scanned_start();
        let mut next = Grid::empty();
        let mv = start.play_into(&mut next, 3).unwrap();
        assert_eq!(start.moves_played(), 0);
        assert_eq!(start.point_count(), 36);
        assert_eq!(next.history(), &[mv]);
        assert_eq!(next.point_count(), 37);
        // The target can be reused for a different child.
        let other = start.play_into(&mut next, 4).unwrap();
        assert_eq!(next.history(), &[other]);
        assert_eq!(next.point_count(), 37);
    }

    #[test]
    fn replaying_a_move_fails() {
        let mut grid = scanned_start();
        grid.play(0).unwrap();
        // The list is stale: candidate 0 now targets an occupied point.
        let err = grid.play(0).unwrap_err();
        assert!(matches!(err, GridError::OccupiedTarget { .. }), "got {err:?}");
    }

    #[test]
    fn bad_index_fails() {
        let mut grid = scanned_start();
        let err = grid.play(28).unwrap_err();
        assert_eq!(err, GridError::NoSuchCandidate { index: 28, count: 28 });
    }

    #[test]
    fn in_place_and_copy_make_agree() {
        let start = scanned_start();
        let mut a = start.clone();
        let mut b = Grid::empty();
        a.play(7).unwrap();
        start.play_into(&mut b, 7).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn missing_support_point_fails() {
        let mut grid = scanned_start();
        let idx = grid
            .candidates()
            .position(Move::new(26, 30, Direction::Horizontal, 4))
            .unwrap();
        *grid.cell_mut(28, 30) = Cell::EMPTY;
        let err = grid.play(idx).unwrap_err();
        assert_eq!(
            err,
            GridError::MissingSupport {
                mv: Move::new(26, 30, Direction::Horizontal, 4),
                x: 28,
                y: 30
            }
        );
    }

    #[test]
    fn consumed_segment_end_fails() {
        let mut grid = scanned_start();
        let first = grid
            .candidates()
            .position(Move::new(26, 30, Direction::Horizontal, 4))
            .unwrap();
        let overlapping = Move::new(31, 30, Direction::Horizontal, 0);
        let second = grid.candidates().position(overlapping).unwrap();
        grid.play(first).unwrap();
        // The stale list still offers a segment sharing three points with the
        // one just drawn; its lower end (27, 30) is already crossed.
        let err = grid.play(second).unwrap_err();
        assert_eq!(err, GridError::MissingSupport { mv: overlapping, x: 27, y: 30 });
    }

    #[test]
    fn full_history_fails() {
        let mut grid = scanned_start();
        grid.history = vec![Move::new(30, 30, Direction::Vertical, 0); HISTORY_CAPACITY];
        let err = grid.play(0).unwrap_err();
        assert_eq!(
            err,
            GridError::CapacityExceeded {
                what: "history",
                capacity: HISTORY_CAPACITY
            }
        );
        assert_eq!(grid.moves_played(), HISTORY_CAPACITY);
    }
}
