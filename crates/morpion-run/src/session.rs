//! The outer driver loop.
//!
//! A run starts from the cross, searches from the current prefix, keeps the
//! longest game seen so far and re-anchors on a prefix of it. By default the
//! whole best game is locked in, so a run is a single top-level search.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use tracing::{debug, info, warn};

use morpion_core::{Grid, construct_game};
use morpion_search::{
    Nmcs, Nrpa, NrpaOutcome, Policy, PolicyListing, RolloutPool, SearchControl, SearchStats,
};

use crate::config::{Algorithm, RunConfig};
use crate::error::RunError;
use crate::report::RunReport;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Summary of the run.
    pub report: RunReport,
    /// The longest game found.
    pub best: Grid,
    /// Policy learned by the last NRPA step. `None` for NMCS.
    pub policy: Option<Policy>,
}

/// A validated run, ready to go.
pub struct Session {
    config: RunConfig,
    control: SearchControl,
}

impl Session {
    /// Validate `config` and build the search control for it.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        config.validate()?;
        let mut control = SearchControl::new(Arc::new(AtomicBool::new(false)));
        if let Some(budget) = config.playout_budget {
            control = control.with_playout_budget(budget);
        }
        Ok(Self { config, control })
    }

    /// The configuration of this run.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The control shared with the searches. Stopping it ends the run after
    /// the current step with the best game found so far.
    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    /// Run to completion.
    pub fn run(&self) -> Result<RunOutcome, RunError> {
        let config = &self.config;
        let start = Instant::now();
        info!(
            algorithm = %config.algorithm,
            level = config.level,
            iterations = config.iterations,
            alpha = config.alpha,
            seed = config.seed,
            threads = config.threads,
            "run started"
        );

        let mut initial = Grid::starting_position();
        initial.search_moves()?;
        let mut node = initial.clone();
        let mut best = initial.clone();
        let mut policy = None;
        let mut stats = SearchStats::default();
        let mut steps = 0;

        while !node.is_terminal() && !self.control.should_stop() {
            let seed = config.seed.wrapping_add(steps as u64);
            steps += 1;
            let result = match config.algorithm {
                Algorithm::Nrpa => {
                    let (outcome, step_stats) = self.nrpa_step(&node, seed)?;
                    stats.merge(&step_stats);
                    debug!(
                        step = steps,
                        entries = outcome.policy.nonzero_count(),
                        "policy:\n{}",
                        PolicyListing(&outcome.policy)
                    );
                    policy = Some(outcome.policy);
                    outcome.best
                }
                Algorithm::Nmcs => {
                    let mut nmcs = Nmcs::seeded(seed, &self.control);
                    let result = nmcs.search(config.level, &node)?;
                    stats.merge(nmcs.stats());
                    result
                }
            };

            if result.moves_played() >= best.moves_played() {
                best = result;
            }
            let target = match config.commit {
                None => best.moves_played(),
                Some(commit) => (node.moves_played() + commit).min(best.moves_played()),
            };
            let anchored = node.moves_played();
            node = construct_game(&best, &initial, target)?;
            info!(
                step = steps,
                prefix = node.moves_played(),
                best = best.moves_played(),
                signature = best.signature(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "step complete"
            );
            if node.moves_played() == anchored && !node.is_terminal() {
                warn!(step = steps, prefix = anchored, "no progress from prefix, ending run");
                break;
            }
        }

        let report = RunReport {
            algorithm: config.algorithm,
            level: config.level,
            seed: config.seed,
            moves: best.moves_played(),
            signature: best.signature(),
            steps,
            stats,
            elapsed: start.elapsed(),
        };
        info!(
            algorithm = %report.algorithm,
            level = report.level,
            moves = report.moves,
            signature = report.signature,
            steps = report.steps,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "run complete"
        );
        Ok(RunOutcome { report, best, policy })
    }

    /// One top-level NRPA search from `node` with a fresh policy.
    fn nrpa_step(&self, node: &Grid, seed: u64) -> Result<(NrpaOutcome, SearchStats), RunError> {
        let config = &self.config;
        if config.threads > 1 {
            let pool = RolloutPool::new(config.threads);
            let result = pool.search(config.nrpa(), config.level, node, &Policy::new(), seed, &self.control)?;
            return Ok(result);
        }
        let mut nrpa = Nrpa::seeded(config.nrpa(), seed, &self.control);
        let outcome = nrpa.search(config.level, node, &Policy::new())?;
        Ok((outcome, *nrpa.stats()))
    }
}

/// Validate `config` and run it to completion.
pub fn run(config: &RunConfig) -> Result<RunOutcome, RunError> {
    Session::new(config.clone())?.run()
}

#[cfg(test)]
mod tests {
    use morpion_core::{Grid, replay_history};

    use super::{Session, run};
    use crate::config::{Algorithm, RunConfig};
    use crate::error::RunError;

    fn small(algorithm: Algorithm) -> RunConfig {
        RunConfig {
            algorithm,
            iterations: 5,
            seed: 3,
            ..RunConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = RunConfig { iterations: 0, ..RunConfig::default() };
        assert!(matches!(Session::new(config), Err(RunError::InvalidConfig { .. })));
    }

    #[test]
    fn nrpa_run_reports_best_game() {
        let outcome = run(&small(Algorithm::Nrpa)).unwrap();
        assert!(outcome.best.is_terminal());
        assert_eq!(outcome.report.moves, outcome.best.moves_played());
        assert_eq!(outcome.report.signature, outcome.best.signature());
        assert_eq!(outcome.report.steps, 1);
        assert_eq!(outcome.report.stats.playouts, 5);
        assert!(outcome.policy.is_some());
    }

    #[test]
    fn nmcs_run_has_no_policy() {
        let outcome = run(&small(Algorithm::Nmcs)).unwrap();
        assert!(outcome.best.is_terminal());
        assert!(outcome.policy.is_none());
        assert_eq!(outcome.report.stats.playouts, 28);
    }

    #[test]
    fn best_game_replays_from_cross() {
        let outcome = run(&small(Algorithm::Nrpa)).unwrap();
        let replayed = replay_history(&Grid::starting_position(), outcome.best.history()).unwrap();
        assert_eq!(replayed.signature(), outcome.report.signature);
    }

    #[test]
    fn stopped_session_returns_start() {
        let session = Session::new(small(Algorithm::Nrpa)).unwrap();
        session.control().stop();
        let outcome = session.run().unwrap();
        assert_eq!(outcome.report.steps, 0);
        assert_eq!(outcome.report.moves, 0);
        assert_eq!(outcome.best.candidates().len(), 28);
    }
}
