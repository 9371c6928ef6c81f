//! Nested Rollout Policy Adaptation.
//!
//! Level 0 is a policy-guided playout. Level `n` runs `iterations` searches
//! at level `n - 1`, keeps the longest game seen (ties go to the newer one),
//! and after each improvement shifts its own copy of the policy towards the
//! moves of that game.

use std::time::Instant;

use morpion_core::{Grid, GridError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, trace};

use crate::control::SearchControl;
use crate::error::SearchError;
use crate::playout::playout;
use crate::policy::Policy;
use crate::select::select_move;
use crate::stats::SearchStats;

/// Parameters shared by every level of an NRPA search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NrpaConfig {
    /// Lower-level searches run per level.
    pub iterations: usize,
    /// Learning rate of the adaptation step.
    pub alpha: f64,
}

impl Default for NrpaConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            alpha: 1.0,
        }
    }
}

/// Result of a search: the longest game found and the policy the top level
/// ended with.
#[derive(Debug, Clone)]
pub struct NrpaOutcome {
    /// Longest game found, with its candidate list scanned.
    pub best: Grid,
    /// The top level's adapted policy.
    pub policy: Policy,
}

/// An NRPA searcher owning its random stream and counters.
pub struct Nrpa<'a> {
    config: NrpaConfig,
    rng: ChaCha8Rng,
    control: &'a SearchControl,
    stats: SearchStats,
}

impl<'a> Nrpa<'a> {
    /// Create a searcher drawing from `rng`.
    pub fn new(config: NrpaConfig, rng: ChaCha8Rng, control: &'a SearchControl) -> Self {
        Self {
            config,
            rng,
            control,
            stats: SearchStats::default(),
        }
    }

    /// Create a searcher seeded with `seed`.
    pub fn seeded(config: NrpaConfig, seed: u64, control: &'a SearchControl) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed), control)
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search from `node` at `level`, starting from `policy`.
    ///
    /// `policy` is never modified; each level works on its own copy.
    pub fn search(&mut self, level: u32, node: &Grid, policy: &Policy) -> Result<NrpaOutcome, SearchError> {
        if level == 0 {
            let best = self.playout(node, policy)?;
            return Ok(NrpaOutcome {
                best,
                policy: policy.clone(),
            });
        }

        let start = Instant::now();
        let mut level_policy = policy.clone();
        let mut best: Option<Grid> = None;
        for iteration in 0..self.config.iterations {
            if self.control.should_stop() {
                debug!(level, iteration, "stop requested");
                break;
            }
            let result = self.search(level - 1, node, &level_policy)?.best;
            if best.as_ref().is_none_or(|b| result.moves_played() >= b.moves_played()) {
                level_policy = adapt(&level_policy, node, &result, self.config.alpha)?;
                self.stats.adaptations += 1;
                best = Some(result);
            }
        }

        let best = match best {
            Some(best) => best,
            None => {
                let mut best = node.clone();
                best.search_moves()?;
                best
            }
        };
        debug!(
            level,
            moves = best.moves_played(),
            signature = best.signature(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completed level"
        );
        Ok(NrpaOutcome {
            best,
            policy: level_policy,
        })
    }

    /// One policy-guided playout from `node`.
    pub fn playout(&mut self, node: &Grid, policy: &Policy) -> Result<Grid, SearchError> {
        let rng = &mut self.rng;
        let end = playout(node, None, |grid| select_move(grid.candidates(), policy, &mut *rng))?;
        self.stats.record_playout(end.moves_played());
        Ok(end)
    }
}

/// Shift `policy` towards the moves `best` played after `root`.
///
/// Replays `best` from `root` with full scans. At every step the recorded
/// move's code gains `alpha` and every candidate's code loses
/// `alpha * exp(w) / Z`, where `Z` sums `exp(w)` over all candidates without
/// priority scaling. All reads come from `policy`, so codes shared by several
/// candidates accumulate every adjustment. Returns the new policy.
pub fn adapt(policy: &Policy, root: &Grid, best: &Grid, alpha: f64) -> Result<Policy, SearchError> {
    let mut adapted = policy.clone();
    let mut node = root.clone();
    node.search_moves()?;
    for step in root.moves_played()..best.moves_played() {
        let target = best.history()[step];
        let candidates = node.candidates();
        let z: f64 = candidates.iter().map(|c| policy.weight(c.code)).sum();
        let Some(index) = candidates.position(target) else {
            error!(step, mv = %target, "recorded move not found while adapting");
            error!("best\n{}", best.pretty());
            error!("node\n{}", node.pretty());
            return Err(GridError::MoveNotFound { step, mv: target }.into());
        };
        adapted.add(candidates[index].code, alpha);
        for c in candidates {
            adapted.add(c.code, -alpha * policy.weight(c.code) / z);
        }
        node.play(index)?;
        node.search_moves()?;
    }
    trace!(
        alpha,
        adapted_moves = best.moves_played().saturating_sub(root.moves_played()),
        signature = node.signature(),
        "adapted policy"
    );
    Ok(adapted)
}
