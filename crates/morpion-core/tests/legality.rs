//! Integration tests for the legality engine.
//!
//! Plays seeded random games and checks, at every step, that the incremental
//! scan agrees with the full scan, that domination is consistent, and that
//! finished games replay exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use morpion_core::{GRID_SIZE, Grid, Move, Priority, construct_game, replay_history};

/// Sorted `(move, priority)` pairs of the current candidate list.
fn snapshot(grid: &Grid) -> Vec<(Move, Priority)> {
    let mut v: Vec<_> = grid.candidates().iter().map(|c| (c.mv, c.priority)).collect();
    v.sort();
    v
}

fn assert_consistent(grid: &Grid) {
    let list = grid.candidates();
    for (i, c) in list.iter().enumerate() {
        match c.dominator {
            Some(d) => {
                assert!(!c.is_forced(), "forced candidate {i} is dominated");
                assert_ne!(d, i);
                assert!(list[d].is_forced(), "dominator {d} of {i} is not forced");
                assert!(list[d].mv.same_placement(c.mv));
            }
            None if !c.is_forced() => {
                let shadowed = list
                    .iter()
                    .any(|o| o.is_forced() && o.mv.same_placement(c.mv));
                assert!(!shadowed, "candidate {i} should be dominated");
            }
            None => {}
        }
        let (x, y) = (c.mv.x() as i32, c.mv.y() as i32);
        assert!(grid.cell(x, y).is_empty());
        let interior = 2..=GRID_SIZE as i32 - 3;
        assert!(interior.contains(&x) && interior.contains(&y), "{} touches the rim", c.mv);
    }
}

/// Play a random game with incremental scans, checking every position.
fn random_game(seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::starting_position();
    grid.search_moves().unwrap();
    let mut next = Grid::empty();
    while !grid.is_terminal() {
        let played = rng.random_range(0..grid.candidates().len());
        let before = grid.point_count();
        grid.play_into(&mut next, played).unwrap();
        next.search_moves_incremental(&grid, played).unwrap();

        assert_eq!(next.point_count(), before + 1);
        assert_eq!(next.history()[..grid.moves_played()], *grid.history());
        assert_consistent(&next);

        let mut full = next.clone();
        full.search_moves().unwrap();
        assert_eq!(
            snapshot(&next),
            snapshot(&full),
            "seed {seed}: scans disagree after {} moves",
            next.moves_played()
        );
        std::mem::swap(&mut grid, &mut next);
    }
    grid
}

#[test]
fn incremental_scan_matches_full_scan() {
    for seed in 0..8 {
        let game = random_game(seed);
        assert!(game.moves_played() >= 10, "seed {seed}: only {} moves", game.moves_played());
    }
}

#[test]
fn finished_games_replay_exactly() {
    for seed in 100..104 {
        let game = random_game(seed);
        let start = Grid::starting_position();
        let replayed = replay_history(&start, game.history()).unwrap();
        assert_eq!(replayed.cells(), game.cells());
        assert!(replayed.is_terminal());
        assert_eq!(replayed.signature(), game.signature());

        let built = construct_game(&game, &start, game.moves_played()).unwrap();
        assert_eq!(built, replayed);
    }
}

#[test]
fn play_redirects_to_dominator() {
    let mut redirected = 0;
    for seed in 200..230 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = Grid::starting_position();
        grid.search_moves().unwrap();
        while !grid.is_terminal() {
            let dominated = grid
                .candidates()
                .iter()
                .position(|c| c.dominator.is_some());
            if let Some(i) = dominated {
                let d = grid.candidates()[i].dominator.unwrap();
                let expected = grid.candidates()[d].mv;
                assert_eq!(grid.play(i).unwrap(), expected);
                assert_eq!(grid.history().last(), Some(&expected));
                redirected += 1;
                break;
            }
            let played = rng.random_range(0..grid.candidates().len());
            grid.play(played).unwrap();
            grid.search_moves().unwrap();
        }
    }
    assert!(redirected > 0, "no random game reached a dominated candidate");
}

#[test]
fn signature_changes_with_every_move() {
    let mut grid = Grid::starting_position();
    grid.search_moves().unwrap();
    let mut last = grid.signature();
    for _ in 0..10 {
        grid.play(0).unwrap();
        grid.search_moves().unwrap();
        let sig = grid.signature();
        assert!(sig > last, "signature should grow as bits are added");
        last = sig;
    }
}
