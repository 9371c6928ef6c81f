//! Rebuilding positions from recorded move sequences.

use tracing::{debug, error};

use crate::error::GridError;
use crate::grid::Grid;
use crate::line_move::Move;

/// Replay `moves` on a copy of `initial`, regenerating the legal moves with
/// full scans before each step.
///
/// The returned grid carries a fresh candidate list. Fails with
/// [`GridError::MoveNotFound`] if a move is not legal when its turn comes;
/// the error's step counts from the start of `initial`'s history.
pub fn replay_history(initial: &Grid, moves: &[Move]) -> Result<Grid, GridError> {
    let mut node = initial.clone();
    let first_step = initial.moves_played();
    for (i, &mv) in moves.iter().enumerate() {
        node.search_moves()?;
        let Some(index) = node.candidates().position(mv) else {
            let step = first_step + i;
            error!(step, %mv, "recorded move is not legal on replay");
            error!("position reached\n{}", node.pretty());
            return Err(GridError::MoveNotFound { step, mv });
        };
        node.play(index)?;
    }
    node.search_moves()?;
    Ok(node)
}

/// Rebuild the first `length` moves of `best`, starting from `initial`.
///
/// `initial` must be a prefix of `best`: its history is kept and only the
/// moves of `best` beyond it are replayed. `length` is clamped to the length
/// of `best`'s history.
pub fn construct_game(best: &Grid, initial: &Grid, length: usize) -> Result<Grid, GridError> {
    let start = initial.moves_played();
    let end = length.min(best.moves_played());
    if start > end || best.history()[..start] != *initial.history() {
        error!(start, end, "starting position is not a prefix of the recorded game");
        error!("recorded game\n{}", best.pretty());
        error!("starting position\n{}", initial.pretty());
        return Err(GridError::NotAPrefix { start, recorded: best.moves_played() });
    }
    debug!(start, end, "constructing game");
    replay_history(initial, &best.history()[start..end]).inspect_err(|_| {
        error!("recorded game\n{}", best.pretty());
    })
}

#[cfg(test)]
mod tests {
    use super::{construct_game, replay_history};
    use crate::error::GridError;
    use crate::grid::Grid;

    /// Play `n` moves, always picking the first candidate.
    fn first_move_game(n: usize) -> Grid {
        let mut grid = Grid::starting_position();
        grid.search_moves().unwrap();
        for _ in 0..n {
            grid.play(0).unwrap();
            grid.search_moves().unwrap();
        }
        grid
    }

    #[test]
    fn replay_reproduces_game() {
        let game = first_move_game(6);
        let replayed = replay_history(&Grid::starting_position(), game.history()).unwrap();
        assert_eq!(replayed.cells(), game.cells());
        assert_eq!(replayed.history(), game.history());
        assert_eq!(replayed.candidates().len(), game.candidates().len());
    }

    #[test]
    fn construct_prefix() {
        let game = first_move_game(8);
        let start = Grid::starting_position();
        let half = construct_game(&game, &start, 4).unwrap();
        assert_eq!(half.history(), &game.history()[..4]);
        // Continue from the half-way point to the end.
        let full = construct_game(&game, &half, 8).unwrap();
        assert_eq!(full.cells(), game.cells());
    }

    #[test]
    fn construct_clamps_length() {
        let game = first_move_game(3);
        let full = construct_game(&game, &Grid::starting_position(), 100).unwrap();
        assert_eq!(full.moves_played(), 3);
    }

    #[test]
    fn illegal_history_is_reported() {
        let game = first_move_game(1);
        // The same move can never be played twice.
        let doubled = [game.history()[0]; 2];
        let err = replay_history(&Grid::starting_position(), &doubled).unwrap_err();
        assert!(matches!(err, GridError::MoveNotFound { step: 1, .. }), "got {err:?}");
    }

    #[test]
    fn non_prefix_start_is_rejected() {
        let a = first_move_game(3);
        let mut b = Grid::starting_position();
        b.search_moves().unwrap();
        let last = b.candidates().len() - 1;
        b.play(last).unwrap();
        assert_ne!(b.history()[0], a.history()[0]);
        let err = construct_game(&a, &b, 3).unwrap_err();
        assert_eq!(err, GridError::NotAPrefix { start: 1, recorded: 3 });
    }
}
