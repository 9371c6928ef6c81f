//! Nested Monte-Carlo Search.

use std::time::Instant;

use morpion_core::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::control::SearchControl;
use crate::error::SearchError;
use crate::playout::playout;
use crate::stats::SearchStats;

/// An NMCS searcher owning its random stream and counters.
///
/// Level 0 is a uniformly random playout. Level `n` tries every legal move
/// in list order, searches each child at level `n - 1`, and keeps the
/// strictly longest result (the first one wins ties).
pub struct Nmcs<'a> {
    rng: ChaCha8Rng,
    control: &'a SearchControl,
    stats: SearchStats,
}

impl<'a> Nmcs<'a> {
    /// Create a searcher drawing from `rng`.
    pub fn new(rng: ChaCha8Rng, control: &'a SearchControl) -> Self {
        Self {
            rng,
            control,
            stats: SearchStats::default(),
        }
    }

    /// Create a searcher seeded with `seed`.
    pub fn seeded(seed: u64, control: &'a SearchControl) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), control)
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search from `node` at `level` and return the longest game found.
    ///
    /// A node without legal moves is returned as is.
    pub fn search(&mut self, level: u32, node: &Grid) -> Result<Grid, SearchError> {
        if level == 0 {
            return self.playout(node);
        }

        let start = Instant::now();
        let mut scanned = node.clone();
        scanned.search_moves()?;
        let mut best: Option<Grid> = None;
        let mut child = Grid::empty();
        for index in 0..scanned.candidates().len() {
            if self.control.should_stop() {
                debug!(level, index, "stop requested");
                break;
            }
            scanned.play_into(&mut child, index)?;
            let result = self.search(level - 1, &child)?;
            if best.as_ref().is_none_or(|b| result.moves_played() > b.moves_played()) {
                best = Some(result);
            }
        }

        let best = best.unwrap_or(scanned);
        debug!(
            level,
            moves = best.moves_played(),
            signature = best.signature(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completed level"
        );
        Ok(best)
    }

    /// One uniformly random playout from `node`, cut short by the control's
    /// playout budget if one is set.
    pub fn playout(&mut self, node: &Grid) -> Result<Grid, SearchError> {
        let rng = &mut self.rng;
        let deadline = self.control.playout_deadline();
        let end = playout(node, deadline, |grid| Ok(rng.random_range(0..grid.candidates().len())))?;
        self.stats.record_playout(end.moves_played());
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use morpion_core::Grid;

    use super::Nmcs;
    use crate::control::SearchControl;

    #[test]
    fn playout_reaches_terminal() {
        let control = SearchControl::unlimited();
        let mut nmcs = Nmcs::seeded(5, &control);
        let end = nmcs.playout(&Grid::starting_position()).unwrap();
        assert!(end.is_terminal());
        assert_eq!(nmcs.stats().playouts, 1);
    }

    #[test]
    fn zero_budget_truncates_playout() {
        let control = SearchControl::unlimited().with_playout_budget(Duration::ZERO);
        let mut nmcs = Nmcs::seeded(5, &control);
        let end = nmcs.playout(&Grid::starting_position()).unwrap();
        assert_eq!(end.moves_played(), 1);
    }

    #[test]
    fn level_one_beats_every_child_playout() {
        let control = SearchControl::unlimited();
        let mut nmcs = Nmcs::seeded(2, &control);
        let best = nmcs.search(1, &Grid::starting_position()).unwrap();
        assert_eq!(nmcs.stats().playouts, 28, "one playout per starting move");
        assert_eq!(best.moves_played(), nmcs.stats().longest_playout);
        assert!(best.is_terminal());
    }

    #[test]
    fn terminal_node_returns_itself() {
        let control = SearchControl::unlimited();
        let mut nmcs = Nmcs::seeded(3, &control);
        let end = nmcs.playout(&Grid::starting_position()).unwrap();
        let again = nmcs.search(2, &end).unwrap();
        assert_eq!(again.history(), end.history());
    }

    #[test]
    fn same_seed_same_result() {
        let control = SearchControl::unlimited();
        let a = Nmcs::seeded(8, &control).search(1, &Grid::starting_position()).unwrap();
        let b = Nmcs::seeded(8, &control).search(1, &Grid::starting_position()).unwrap();
        assert_eq!(a.history(), b.history());
    }
}
