//! Run configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use morpion_search::NrpaConfig;

use crate::error::RunError;

/// Which search drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Nested Rollout Policy Adaptation.
    #[default]
    Nrpa,
    /// Nested Monte-Carlo Search.
    Nmcs,
}

impl FromStr for Algorithm {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nrpa" => Ok(Algorithm::Nrpa),
            "nmcs" => Ok(Algorithm::Nmcs),
            _ => Err(RunError::UnknownAlgorithm { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Nrpa => write!(f, "nrpa"),
            Algorithm::Nmcs => write!(f, "nmcs"),
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Search algorithm.
    pub algorithm: Algorithm,
    /// Nesting level of the top-level search (at least 1).
    pub level: u32,
    /// Lower-level searches per NRPA level.
    pub iterations: usize,
    /// NRPA learning rate.
    pub alpha: f64,
    /// Seed of the run's random stream.
    pub seed: u64,
    /// Moves of the best game to lock in after each outer step.
    /// `None` locks in the whole game, so the run ends after one step.
    pub commit: Option<usize>,
    /// Workers for root-parallel NRPA. 1 runs the serial search.
    pub threads: usize,
    /// Wall-clock cap on each uniform NMCS playout.
    pub playout_budget: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Nrpa,
            level: 1,
            iterations: 100,
            alpha: 1.0,
            seed: 1,
            commit: None,
            threads: 1,
            playout_budget: None,
        }
    }
}

impl RunConfig {
    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), RunError> {
        let reason = if self.level == 0 {
            "level must be at least 1"
        } else if self.iterations == 0 {
            "iterations must be at least 1"
        } else if !self.alpha.is_finite() || self.alpha <= 0.0 {
            "alpha must be positive and finite"
        } else if self.threads == 0 {
            "threads must be at least 1"
        } else if self.commit == Some(0) {
            "commit must be at least 1 move"
        } else {
            return Ok(());
        };
        Err(RunError::InvalidConfig {
            reason: reason.to_string(),
        })
    }

    /// The NRPA parameters of this run.
    pub fn nrpa(&self) -> NrpaConfig {
        NrpaConfig {
            iterations: self.iterations,
            alpha: self.alpha,
        }
    }
}
