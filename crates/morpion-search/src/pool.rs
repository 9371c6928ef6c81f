//! Root-parallel NRPA.

use std::time::Instant;

use morpion_core::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::control::SearchControl;
use crate::error::SearchError;
use crate::nrpa::{Nrpa, NrpaConfig, NrpaOutcome, adapt};
use crate::policy::Policy;
use crate::stats::SearchStats;

/// Runs the top level of an NRPA search on several threads.
///
/// Iterations are dispatched in batches of `threads`. Every worker in a batch
/// searches level `n - 1` with the policy as it stood when the batch began
/// and a random stream of its own (`seed`, stream = iteration index). The
/// results are then folded in iteration order with the usual "at least as
/// long as the best" rule, adapting the policy serially. For a fixed seed and
/// thread count the outcome is reproducible.
pub struct RolloutPool {
    threads: usize,
}

impl RolloutPool {
    /// Create a pool running `threads` workers per batch.
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Number of workers per batch.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Search from `node` at `level`, starting from `policy`.
    ///
    /// Returns the outcome and the counters summed over every worker.
    pub fn search(
        &self,
        config: NrpaConfig,
        level: u32,
        node: &Grid,
        policy: &Policy,
        seed: u64,
        control: &SearchControl,
    ) -> Result<(NrpaOutcome, SearchStats), SearchError> {
        if level == 0 {
            let mut nrpa = Nrpa::new(config, worker_rng(seed, 0), control);
            let outcome = nrpa.search(0, node, policy)?;
            return Ok((outcome, *nrpa.stats()));
        }

        let start = Instant::now();
        let mut level_policy = policy.clone();
        let mut best: Option<Grid> = None;
        let mut stats = SearchStats::default();
        let mut iteration = 0;

        while iteration < config.iterations && !control.should_stop() {
            let batch = self.threads.min(config.iterations - iteration);
            let snapshot = &level_policy;

            let results: Vec<Result<(Grid, SearchStats), SearchError>> = std::thread::scope(|s| {
                let handles: Vec<_> = (iteration..iteration + batch)
                    .map(|i| {
                        s.spawn(move || -> Result<(Grid, SearchStats), SearchError> {
                            let mut nrpa = Nrpa::new(config, worker_rng(seed, i as u64), control);
                            let result = nrpa.search(level - 1, node, snapshot)?.best;
                            Ok((result, *nrpa.stats()))
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .zip(iteration..)
                    .map(|(h, i)| h.join().unwrap_or_else(|_| Err(SearchError::WorkerPanicked { iteration: i })))
                    .collect()
            });

            for result in results {
                let (result, worker_stats) = result?;
                stats.merge(&worker_stats);
                if best.as_ref().is_none_or(|b| result.moves_played() >= b.moves_played()) {
                    level_policy = adapt(&level_policy, node, &result, config.alpha)?;
                    stats.adaptations += 1;
                    best = Some(result);
                }
            }
            iteration += batch;
            debug!(
                level,
                iteration,
                moves = best.as_ref().map_or(0, |b| b.moves_played()),
                "batch complete"
            );
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
            threads = self.threads,
            moves = best.moves_played(),
            signature = best.signature(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completed parallel level"
        );
        Ok((
            NrpaOutcome {
                best,
                policy: level_policy,
            },
            stats,
        ))
    }
}

/// Random stream of worker `stream` under `seed`.
fn worker_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

#[cfg(test)]
mod tests {
    use super::{RolloutPool, worker_rng};
    use rand::Rng;

    #[test]
    fn threads_at_least_one() {
        assert_eq!(RolloutPool::new(0).threads(), 1);
        assert_eq!(RolloutPool::new(4).threads(), 4);
    }

    #[test]
    fn streams_differ() {
        let a: u64 = worker_rng(1, 0).random();
        let b: u64 = worker_rng(1, 1).random();
        let c: u64 = worker_rng(1, 0).random();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
