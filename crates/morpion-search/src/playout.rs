//! Single descent from a position to a terminal position.

use std::time::Instant;

use morpion_core::Grid;
use tracing::trace;

use crate::error::SearchError;

/// Play from a copy of `node` until no legal move remains, letting `choose`
/// pick the candidate index at every step.
///
/// Two buffers alternate: each move is copy-made into the other buffer and
/// rescanned incrementally against the position it came from. With a
/// `deadline`, the playout stops after the first move that finishes past it
/// and returns the position reached.
pub(crate) fn playout<F>(
    node: &Grid,
    deadline: Option<Instant>,
    mut choose: F,
) -> Result<Grid, SearchError>
where
    F: FnMut(&Grid) -> Result<usize, SearchError>,
{
    let mut current = node.clone();
    current.search_moves()?;
    let mut next = Grid::empty();
    while !current.is_terminal() {
        let index = choose(&current)?;
        current.play_into(&mut next, index)?;
        next.search_moves_incremental(&current, index)?;
        std::mem::swap(&mut current, &mut next);
        if deadline.is_some_and(|d| Instant::now() >= d) {
            trace!(moves = current.moves_played(), "playout budget exhausted");
            break;
        }
    }
    trace!(moves = current.moves_played(), "playout finished");
    Ok(current)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use morpion_core::Grid;

    use super::playout;

    #[test]
    fn first_choice_playout_terminates() {
        let start = Grid::starting_position();
        let end = playout(&start, None, |_| Ok(0)).unwrap();
        assert!(end.is_terminal());
        assert!(end.moves_played() > 0);
        assert_eq!(end.point_count(), 36 + end.moves_played());
        assert_eq!(start.moves_played(), 0);
    }

    #[test]
    fn expired_deadline_stops_after_one_move() {
        let start = Grid::starting_position();
        let end = playout(&start, Some(Instant::now()), |_| Ok(0)).unwrap();
        assert_eq!(end.moves_played(), 1);
        assert!(!end.is_terminal());
    }

    #[test]
    fn playout_from_terminal_returns_it() {
        let start = Grid::starting_position();
        let end = playout(&start, None, |_| Ok(0)).unwrap();
        let again = playout(&end, None, |_| unreachable!()).unwrap();
        assert_eq!(again.history(), end.history());
    }
}
